//! Data-Oriented Axis-Aligned Bounding Box
//!
//! Plain data plus free functions, the box never owns anything and is
//! recomputed wherever it is needed.

use cgmath::{Point3, Vector3};

use super::ray::Ray;
use crate::spatial::SplitAxis;

/// Axis-Aligned Bounding Box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

/// Empty box. Expanding it by a point yields the degenerate box around that point.
/// Must be filtered out with `aabb_is_valid` before any geometric query.
pub const INVALID_AABB: AABB = AABB {
    min: Point3 {
        x: f32::INFINITY,
        y: f32::INFINITY,
        z: f32::INFINITY,
    },
    max: Point3 {
        x: f32::NEG_INFINITY,
        y: f32::NEG_INFINITY,
        z: f32::NEG_INFINITY,
    },
};

/// Create new AABB from min/max points
pub fn create_aabb(min: Point3<f32>, max: Point3<f32>) -> AABB {
    AABB { min, max }
}

/// True once every axis satisfies min <= max
pub fn aabb_is_valid(aabb: &AABB) -> bool {
    (0..3).all(|dim| aabb.min[dim] <= aabb.max[dim])
}

/// Extent per axis
pub fn aabb_extent(aabb: &AABB) -> Vector3<f32> {
    aabb.max - aabb.min
}

/// Widen the box so it contains `point`
pub fn aabb_expand_to_contain(aabb: &mut AABB, point: Point3<f32>) {
    for dim in 0..3 {
        let value = point[dim];
        if value < aabb.min[dim] {
            aabb.min[dim] = value;
        }
        if value > aabb.max[dim] {
            aabb.max[dim] = value;
        }
    }
}

/// Test if AABB contains a point, bounds included
pub fn aabb_contains_point(aabb: &AABB, point: Point3<f32>) -> bool {
    (0..3).all(|dim| point[dim] >= aabb.min[dim] && point[dim] <= aabb.max[dim])
}

/// Axis with the largest extent. Ties go to the lowest axis.
pub fn aabb_find_widest_dim(aabb: &AABB) -> SplitAxis {
    let extent = aabb_extent(aabb);

    let mut widest_dim = 0;
    let mut widest_value = extent[0];
    for dim in 1..3 {
        if widest_value < extent[dim] {
            widest_value = extent[dim];
            widest_dim = dim;
        }
    }

    SplitAxis::from_dim(widest_dim)
}

/// Slab test of the ray's infinite line against the box
///
/// Returns the parametric interval `[tmin, tmax]` during which the line is
/// inside the box. `tmin` may be negative. Axes the ray does not move along are
/// handled by the infinities in `inverse_direction`.
pub fn aabb_ray_trace(aabb: &AABB, ray: &Ray) -> Option<[f32; 2]> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for dim in 0..3 {
        let t1 = (aabb.min[dim] - ray.origin[dim]) * ray.inverse_direction[dim];
        let t2 = (aabb.max[dim] - ray.origin[dim]) * ray.inverse_direction[dim];

        // f32::min/max skip the NaN of 0 * inf when the origin sits on a slab plane
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }

    if t_max < t_min {
        None
    } else {
        Some([t_min, t_max])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AABB {
        create_aabb(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_invalid_aabb() {
        assert!(!aabb_is_valid(&INVALID_AABB));
        assert!(aabb_is_valid(&unit_box()));

        let mut aabb = INVALID_AABB;
        aabb_expand_to_contain(&mut aabb, Point3::new(2.0, -1.0, 3.0));
        assert!(aabb_is_valid(&aabb));
        assert_eq!(aabb.min, aabb.max);
    }

    #[test]
    fn test_expand_implies_contains() {
        let points = [
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(-3.0, 0.2, 8.0),
            Point3::new(10.0, -10.0, 0.0),
            Point3::new(1e6, 1e-6, -1e6),
        ];

        let mut aabb = unit_box();
        for point in points {
            aabb_expand_to_contain(&mut aabb, point);
            assert!(aabb_contains_point(&aabb, point));
        }
        for point in points {
            assert!(aabb_contains_point(&aabb, point));
        }
    }

    #[test]
    fn test_expand_is_noop_for_inside_point() {
        let mut aabb = unit_box();
        aabb_expand_to_contain(&mut aabb, Point3::new(0.25, 0.75, 1.0));
        assert_eq!(aabb, unit_box());
    }

    #[test]
    fn test_find_widest_dim() {
        let aabb = create_aabb(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 3.0, 2.0));
        assert_eq!(aabb_find_widest_dim(&aabb), SplitAxis::Y);

        // ties resolve to the lowest axis
        assert_eq!(aabb_find_widest_dim(&unit_box()), SplitAxis::X);
        let aabb = create_aabb(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 2.0));
        assert_eq!(aabb_find_widest_dim(&aabb), SplitAxis::Y);
    }

    #[test]
    fn test_ray_trace_hit() {
        let ray = Ray::from_start_and_end(Point3::new(-1.0, 0.5, 0.5), Point3::new(3.0, 0.5, 0.5));
        let [t_min, t_max] = aabb_ray_trace(&unit_box(), &ray).expect("ray crosses box");
        assert!((t_min - 1.0).abs() < 1e-6);
        assert!((t_max - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_trace_uses_infinite_line() {
        // box lies behind the origin, the line still enters it
        let ray = Ray::from_start_and_end(Point3::new(3.0, 0.5, 0.5), Point3::new(4.0, 0.5, 0.5));
        let [t_min, t_max] = aabb_ray_trace(&unit_box(), &ray).expect("line crosses box");
        assert!(t_min < 0.0 && t_max < 0.0);
    }

    #[test]
    fn test_ray_trace_miss() {
        let ray = Ray::from_start_and_end(Point3::new(-1.0, 2.0, 0.5), Point3::new(3.0, 2.5, 0.5));
        assert!(aabb_ray_trace(&unit_box(), &ray).is_none());

        // axis aligned ray outside the slab on a zero direction axis
        let ray = Ray::from_start_and_end(Point3::new(-1.0, 1.5, 0.5), Point3::new(3.0, 1.5, 0.5));
        assert!(aabb_ray_trace(&unit_box(), &ray).is_none());
    }

    #[test]
    fn test_ray_trace_axis_aligned_inside_slab() {
        let ray = Ray::from_start_and_end(Point3::new(0.5, 0.5, -2.0), Point3::new(0.5, 0.5, -1.0));
        let [t_min, t_max] = aabb_ray_trace(&unit_box(), &ray).expect("line crosses box");
        assert!((t_min - 2.0).abs() < 1e-6);
        assert!((t_max - 3.0).abs() < 1e-6);
    }
}
