use cgmath::{InnerSpace, Point3, Vector3};

use super::aabb::{aabb_expand_to_contain, AABB, INVALID_AABB};
use crate::constants::ray::TRIANGLE_PARALLEL_EPSILON;

/// Triangle primitive, built once from mesh data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Bounding box over every vertex of every triangle.
    /// An empty slice yields `INVALID_AABB`.
    pub fn create_aabb(triangles: &[Triangle]) -> AABB {
        let mut aabb = INVALID_AABB;
        for triangle in triangles {
            for vertex in triangle.vertices {
                aabb_expand_to_contain(&mut aabb, vertex);
            }
        }
        aabb
    }
}

/// Möller–Trumbore ray/triangle intersection
///
/// Returns the ray parameter of the hit. The result is not clipped to any
/// t-range, negative values mean the triangle lies behind the origin.
pub fn triangle_ray_intersection(
    triangle: &Triangle,
    ray_origin: Point3<f32>,
    ray_direction: Vector3<f32>,
) -> Option<f32> {
    let [v0, v1, v2] = triangle.vertices;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_direction.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < TRIANGLE_PARALLEL_EPSILON {
        // parallel to the triangle plane
        return None;
    }

    let f = 1.0 / det;
    let s = ray_origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    Some(f * edge2.dot(q))
}

/// Mean of the three vertices along `dim`
pub fn triangle_centroid(triangle: &Triangle, dim: usize) -> f32 {
    let [v0, v1, v2] = triangle.vertices;
    (v0[dim] + v1[dim] + v2[dim]) / 3.0
}

/// Smallest and largest vertex coordinate along `dim`
pub fn triangle_dim_range(triangle: &Triangle, dim: usize) -> (f32, f32) {
    let [v0, v1, v2] = triangle.vertices;
    (
        v0[dim].min(v1[dim]).min(v2[dim]),
        v0[dim].max(v1[dim]).max(v2[dim]),
    )
}
