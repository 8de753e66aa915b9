//! Portal registry, virtual camera tree and portal crossing queries

use cgmath::{InnerSpace, Matrix4, Transform as _};

use super::n_tree::{calc_first_layer_index, calc_total_elements, get_child_element_idx};
use super::portal_data::{Portal, PortalEndpoint, PortalRayTraceResult};
use crate::geometry::Ray;
use crate::mesh::TriangleMesh;

/// Owns every portal of a scene
///
/// Portals are only added during scene setup. Their insertion order is the
/// portal index used by the camera tree and the debug colors.
#[derive(Debug, Clone, Default)]
pub struct PortalManager {
    portals: Vec<Portal>,
}

impl PortalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a portal and returns its index
    pub fn add(&mut self, portal: Portal) -> usize {
        self.portals.push(portal);
        self.portals.len() - 1
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn portal_count(&self) -> usize {
        self.portals.len()
    }

    /// Branching factor of the camera tree, both endpoints of every portal
    pub fn endpoint_count(&self) -> usize {
        self.portals.len() * 2
    }

    /// Fills `out_camera_transforms` with the virtual camera of every node of
    /// the recursion tree, root camera first.
    ///
    /// `out_camera_transforms` must hold at least
    /// `camera_buffer_element_count(max_recursion_count)` matrices.
    pub fn create_camera_mats(
        &self,
        camera_mat: Matrix4<f32>,
        max_recursion_count: usize,
        out_camera_transforms: &mut [Matrix4<f32>],
    ) {
        let n = self.endpoint_count();
        let required = self.camera_buffer_element_count(max_recursion_count);
        assert!(
            out_camera_transforms.len() >= required,
            "camera buffer holds {} matrices, {} required",
            out_camera_transforms.len(),
            required
        );

        out_camera_transforms[0] = camera_mat;

        for depth in 1..=max_recursion_count {
            let first_parent = calc_first_layer_index(n, depth - 1);
            let end_parent = calc_first_layer_index(n, depth);

            for parent_idx in first_parent..end_parent {
                let parent_mat = out_camera_transforms[parent_idx];

                for (portal_index, portal) in self.portals.iter().enumerate() {
                    for endpoint in PortalEndpoint::ALL {
                        let child_idx = get_child_element_idx(n, parent_idx, endpoint.child_num(portal_index));
                        out_camera_transforms[child_idx] = portal.endpoint_transform(endpoint) * parent_mat;
                    }
                }
            }
        }
    }

    /// Allocating version of `create_camera_mats`
    pub fn camera_mats(&self, camera_mat: Matrix4<f32>, max_recursion_count: usize) -> Vec<Matrix4<f32>> {
        let mut result = vec![camera_mat; self.camera_buffer_element_count(max_recursion_count)];
        self.create_camera_mats(camera_mat, max_recursion_count, &mut result);
        result
    }

    /// Nearest portal surface crossed by `movement_ray`
    ///
    /// `portal_meshes` is indexed by each portal's mesh index. Every endpoint
    /// is traced in its own model space and the hits are compared by world
    /// space distance from the ray origin.
    pub fn ray_trace(&self, movement_ray: &Ray, portal_meshes: &[TriangleMesh]) -> Option<PortalRayTraceResult> {
        let mut result: Option<PortalRayTraceResult> = None;

        for (portal_index, portal) in self.portals.iter().enumerate() {
            let mesh = &portal_meshes[portal.mesh_index()];

            for endpoint in PortalEndpoint::ALL {
                let model_ray = movement_ray.transformed(portal.inverse_model_matrix(endpoint));
                let Some(t) = mesh.ray_trace(&model_ray) else {
                    continue;
                };

                let world_hit_location = portal
                    .model_matrix(endpoint)
                    .transform_point(model_ray.calc_position(t));
                let distance = (world_hit_location - movement_ray.origin).magnitude();

                if result.map_or(true, |best| distance < best.distance) {
                    result = Some(PortalRayTraceResult {
                        distance,
                        portal_index,
                        endpoint,
                        world_hit_location,
                    });
                }
            }
        }

        result
    }

    /// Transform for whatever moved along `ray` through the nearest portal
    pub fn find_hit_portal_teleport_matrix(&self, ray: &Ray, portal_meshes: &[TriangleMesh]) -> Option<Matrix4<f32>> {
        self.ray_trace(ray, portal_meshes)
            .map(|hit| *self.portals[hit.portal_index].endpoint_transform(hit.endpoint))
    }

    /// Moves a camera through the portal it crossed while moving along `ray`.
    /// Returns `None` if no portal was crossed.
    pub fn teleport_camera(
        &self,
        camera_mat: &Matrix4<f32>,
        ray: &Ray,
        portal_meshes: &[TriangleMesh],
    ) -> Option<Matrix4<f32>> {
        let hit = self.ray_trace(ray, portal_meshes)?;
        let teleport = self.portals[hit.portal_index].endpoint_transform(hit.endpoint);

        log::debug!(
            "[PortalManager::teleport_camera] Crossed portal {} through endpoint {:?} at {:?}",
            hit.portal_index,
            hit.endpoint,
            hit.world_hit_location
        );
        Some(teleport * camera_mat)
    }

    pub fn camera_buffer_element_count(&self, max_recursion_count: usize) -> usize {
        Self::camera_buffer_element_count_for(max_recursion_count, self.portal_count())
    }

    /// Camera buffer size for `portal_count` portals, each contributing two endpoints
    pub fn camera_buffer_element_count_for(max_recursion_count: usize, portal_count: usize) -> usize {
        calc_total_elements(portal_count * 2, max_recursion_count + 1)
    }
}
