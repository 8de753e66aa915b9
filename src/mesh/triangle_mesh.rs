//! Triangle mesh with a model space bounding box and kd-tree
//!
//! Immutable after construction. All queries take `&self`, so a mesh can be
//! shared between threads for read-only ray tracing.

use cgmath::Point3;
use rayon::prelude::*;

use crate::error::{PortalError, PortalResult};
use crate::geometry::{aabb_is_valid, aabb_ray_trace, triangle_ray_intersection, Ray, Triangle, AABB};
use crate::spatial::{build_kd_tree, ray_tolerance, ray_trace, KdTree, RayTraceData};

#[derive(Debug, Clone)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    model_bounding_box: AABB,
    kd_tree: KdTree,
}

impl TriangleMesh {
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        if triangles.is_empty() {
            log::warn!("[TriangleMesh::from_triangles] Building mesh without triangles");
        }

        let model_bounding_box = Triangle::create_aabb(&triangles);
        let kd_tree = build_kd_tree(&triangles, Some(&model_bounding_box));

        Self {
            triangles,
            model_bounding_box,
            kd_tree,
        }
    }

    /// Builds a mesh from an index buffer, three indices per triangle
    pub fn from_indexed_vertices(positions: &[Point3<f32>], indices: &[u32]) -> PortalResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(PortalError::InvalidMeshData(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }

        let vertex = |index: u32| {
            positions.get(index as usize).copied().ok_or_else(|| {
                PortalError::InvalidMeshData(format!(
                    "index {} out of range for {} vertices",
                    index,
                    positions.len()
                ))
            })
        };

        let triangles = indices
            .chunks_exact(3)
            .map(|face| -> PortalResult<Triangle> {
                Ok(Triangle::new(vertex(face[0])?, vertex(face[1])?, vertex(face[2])?))
            })
            .collect::<PortalResult<Vec<_>>>()?;

        Ok(Self::from_triangles(triangles))
    }

    /// Nearest hit along `ray` within `[0, ray.distance]`, in units of the ray direction
    pub fn ray_trace(&self, ray: &Ray) -> Option<f32> {
        if !aabb_is_valid(&self.model_bounding_box) {
            return None;
        }

        // Flat meshes have a zero width box interval. Padding it keeps the
        // re-anchored origin in front of the surface by more than rounding error.
        let [box_tmin, box_tmax] = aabb_ray_trace(&self.model_bounding_box, ray)?;
        let padding = ray_tolerance(ray);
        let tmin = (box_tmin - padding).max(0.0);
        let tmax = (box_tmax + padding).min(ray.distance);
        if tmin > tmax {
            return None;
        }

        // Start the traversal at the box entry so the tree sees a short segment
        let clipped_ray = Ray::from_origin_and_direction(ray.calc_position(tmin), ray.direction, tmax - tmin);
        let data = RayTraceData {
            tree: &self.kd_tree,
            ray: clipped_ray,
            data_elements: &self.triangles,
            intersection_function: |ray: &Ray, triangle: &Triangle| {
                triangle_ray_intersection(triangle, ray.origin, ray.direction)
            },
        };

        ray_trace(&data, &self.kd_tree.root, clipped_ray.distance, 0.0).map(|hit| hit.t + tmin)
    }

    /// Traces many rays in parallel, one result per ray in input order
    pub fn ray_trace_batch(&self, rays: &[Ray]) -> Vec<Option<f32>> {
        rays.par_iter().map(|ray| self.ray_trace(ray)).collect()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn model_bounding_box(&self) -> &AABB {
        &self.model_bounding_box
    }

    pub fn kd_tree(&self) -> &KdTree {
        &self.kd_tree
    }
}
