use cgmath::{InnerSpace, Matrix4, Point3, Transform as _, Vector3};

/// Finite ray segment used for portal crossing tests
///
/// `distance` is measured in units of `direction`. Rays built from two points
/// have a normalized direction, so `distance` is the world length of the segment.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
    /// Per-axis reciprocal of `direction`, infinite on axes the ray does not move along
    pub inverse_direction: Vector3<f32>,
    pub distance: f32,
}

impl Ray {
    pub fn from_origin_and_direction(
        origin: Point3<f32>,
        direction: Vector3<f32>,
        distance: f32,
    ) -> Self {
        Self {
            origin,
            direction,
            inverse_direction: Vector3::new(1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z),
            distance,
        }
    }

    /// Segment from `start` to `end`. A zero length segment gets a zero direction.
    pub fn from_start_and_end(start: Point3<f32>, end: Point3<f32>) -> Self {
        let delta = end - start;
        let distance = delta.magnitude();
        let direction = if distance > 0.0 {
            delta / distance
        } else {
            Vector3::new(0.0, 0.0, 0.0)
        };
        Self::from_origin_and_direction(start, direction, distance)
    }

    pub fn calc_position(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    pub fn end(&self) -> Point3<f32> {
        self.calc_position(self.distance)
    }

    /// Maps both segment end points through `matrix` and rebuilds the ray from them.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Ray {
        let start = matrix.transform_point(self.origin);
        let end = matrix.transform_point(self.end());
        Ray::from_start_and_end(start, end)
    }
}
