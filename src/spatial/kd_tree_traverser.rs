//! Stateless nearest-hit ray traversal of a kd-tree
//!
//! Near child first, early exit on a hit. Any hit found on the near side of a
//! split plane is closer than everything on the far side, because the plane
//! crossing is a lower bound for far side hits.

use super::kd_node::KdNode;
use super::kd_tree_data::KdTree;
use super::kd_tree_operations::{get_data_indices, get_node};
use crate::constants::ray::{RAY_EPSILON, RAY_RELATIVE_EPSILON};
use crate::geometry::{Ray, Triangle};

/// Nearest hit of a traversal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayTraceResult {
    pub t: f32,
    /// Index into the triangle slice the tree was built from
    pub index: u32,
}

/// Everything a traversal reads, borrowed from the caller
pub struct RayTraceData<'a, F>
where
    F: Fn(&Ray, &Triangle) -> Option<f32>,
{
    pub tree: &'a KdTree,
    pub ray: Ray,
    /// Must be the slice the tree was built from
    pub data_elements: &'a [Triangle],
    pub intersection_function: F,
}

/// Slack on cell boundaries for `ray`
///
/// Scales with the largest coordinate and `t` the ray covers, since plane
/// crossings and triangle hits are rounded at that magnitude. Triangles lying
/// on a split plane report a `t` a few ulps off the crossing.
pub fn ray_tolerance(ray: &Ray) -> f32 {
    let origin_extent = ray
        .origin
        .x
        .abs()
        .max(ray.origin.y.abs())
        .max(ray.origin.z.abs());
    RAY_EPSILON.max(RAY_RELATIVE_EPSILON * (origin_extent + ray.distance.abs()))
}

/// Nearest hit in `node` with `t` inside `[tmin, tmax]` (plus [`ray_tolerance`] slack)
pub fn ray_trace<F>(
    data: &RayTraceData<'_, F>,
    node: &KdNode,
    tmax: f32,
    tmin: f32,
) -> Option<RayTraceResult>
where
    F: Fn(&Ray, &Triangle) -> Option<f32>,
{
    match *node {
        KdNode::Leaf(view) => {
            let tolerance = ray_tolerance(&data.ray);
            let mut result: Option<RayTraceResult> = None;
            for &index in get_data_indices(data.tree, view) {
                let triangle = &data.data_elements[index as usize];
                let Some(t) = (data.intersection_function)(&data.ray, triangle) else {
                    continue;
                };

                if t < tmin - tolerance || t > tmax + tolerance {
                    continue;
                }

                if result.map_or(true, |best| t < best.t) {
                    result = Some(RayTraceResult { t, index });
                }
            }
            result
        }
        KdNode::Internal {
            axis,
            split_value,
            children,
        } => {
            let dim = axis.dim();
            let position_in_dim = data.ray.origin[dim] + data.ray.direction[dim] * tmin;

            let near_child_num = if position_in_dim < split_value { 0 } else { 1 };
            let near_node = get_node(data.tree, children.child(near_child_num));

            let direction_in_dim = data.ray.direction[dim];
            if direction_in_dim == 0.0 {
                // never reaches the plane
                return ray_trace(data, near_node, tmax, tmin);
            }

            let t_cross = (split_value - data.ray.origin[dim]) / direction_in_dim;
            if t_cross < tmin || t_cross > tmax {
                return ray_trace(data, near_node, tmax, tmin);
            }

            if let Some(hit) = ray_trace(data, near_node, t_cross, tmin) {
                return Some(hit);
            }

            let far_node = get_node(data.tree, children.child(near_child_num ^ 1));
            ray_trace(data, far_node, tmax, t_cross)
        }
    }
}

/// Linear scan over every triangle, the reference the tree must agree with
pub fn brute_force_ray_trace<F>(
    ray: &Ray,
    triangles: &[Triangle],
    tmax: f32,
    tmin: f32,
    intersection_function: F,
) -> Option<RayTraceResult>
where
    F: Fn(&Ray, &Triangle) -> Option<f32>,
{
    let tolerance = ray_tolerance(ray);
    triangles
        .iter()
        .zip(0u32..)
        .filter_map(|(triangle, index)| {
            intersection_function(ray, triangle)
                .filter(|&t| t >= tmin - tolerance && t <= tmax + tolerance)
                .map(|t| RayTraceResult { t, index })
        })
        .min_by(|a, b| a.t.total_cmp(&b.t))
}
