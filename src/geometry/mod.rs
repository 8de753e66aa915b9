//! Geometry primitives - rays, bounding boxes, triangles and transforms

pub mod aabb;
pub mod ray;
pub mod transform;
pub mod triangle;

pub use aabb::{
    aabb_contains_point, aabb_expand_to_contain, aabb_extent, aabb_find_widest_dim,
    aabb_is_valid, aabb_ray_trace, create_aabb, AABB, INVALID_AABB,
};
pub use ray::Ray;
pub use transform::Transform;
pub use triangle::{triangle_centroid, triangle_dim_range, triangle_ray_intersection, Triangle};
