//! Portal data - Pure DOP
//!
//! A portal is one mesh placed twice. Whatever crosses endpoint A comes out
//! of endpoint B and the other way around.

use cgmath::{Matrix4, Point3, SquareMatrix};

use crate::error::{PortalError, PortalResult};
use crate::geometry::Transform;

/// One side of a portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortalEndpoint {
    A = 0,
    B = 1,
}

impl PortalEndpoint {
    pub const ALL: [PortalEndpoint; 2] = [PortalEndpoint::A, PortalEndpoint::B];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn other(self) -> Self {
        match self {
            PortalEndpoint::A => PortalEndpoint::B,
            PortalEndpoint::B => PortalEndpoint::A,
        }
    }

    /// Child number of this endpoint of portal `portal_index` in the camera tree
    pub fn child_num(self, portal_index: usize) -> usize {
        portal_index * 2 + self.index()
    }
}

/// Paired portal surfaces sharing one mesh
///
/// `a_to_b` maps endpoint A's frame onto endpoint B's, so
/// `a_to_b * a_transform == b_transform`. The inverses are derived once at
/// construction and kept in sync with the model matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portal {
    mesh_index: usize,
    a_transform: Matrix4<f32>,
    b_transform: Matrix4<f32>,
    a_to_b: Matrix4<f32>,
    b_to_a: Matrix4<f32>,
    a_inverse: Matrix4<f32>,
    b_inverse: Matrix4<f32>,
}

fn invert(matrix: &Matrix4<f32>, context: &str) -> PortalResult<Matrix4<f32>> {
    matrix.invert().ok_or_else(|| PortalError::SingularTransform {
        context: context.to_string(),
    })
}

impl Portal {
    pub fn create_with_portal_transforms(
        mesh_index: usize,
        a_transform: &Transform,
        b_transform: &Transform,
    ) -> PortalResult<Self> {
        Self::create_with_model_mats(mesh_index, a_transform.to_matrix(), b_transform.to_matrix())
    }

    pub fn create_with_model_mats(
        mesh_index: usize,
        a_transform: Matrix4<f32>,
        b_transform: Matrix4<f32>,
    ) -> PortalResult<Self> {
        let a_inverse = invert(&a_transform, "portal endpoint A model matrix")?;
        let b_inverse = invert(&b_transform, "portal endpoint B model matrix")?;
        let a_to_b = b_transform * a_inverse;
        let b_to_a = invert(&a_to_b, "portal A to B transform")?;

        Ok(Self {
            mesh_index,
            a_transform,
            b_transform,
            a_to_b,
            b_to_a,
            a_inverse,
            b_inverse,
        })
    }

    /// Endpoint B is placed at `a_to_b * a_transform`
    pub fn create_with_model_mat_and_translation(
        mesh_index: usize,
        a_transform: Matrix4<f32>,
        a_to_b: Matrix4<f32>,
    ) -> PortalResult<Self> {
        let b_transform = a_to_b * a_transform;
        let a_inverse = invert(&a_transform, "portal endpoint A model matrix")?;
        let b_inverse = invert(&b_transform, "portal endpoint B model matrix")?;
        let b_to_a = invert(&a_to_b, "portal A to B transform")?;

        Ok(Self {
            mesh_index,
            a_transform,
            b_transform,
            a_to_b,
            b_to_a,
            a_inverse,
            b_inverse,
        })
    }

    pub fn mesh_index(&self) -> usize {
        self.mesh_index
    }

    pub fn a_to_b(&self) -> &Matrix4<f32> {
        &self.a_to_b
    }

    pub fn b_to_a(&self) -> &Matrix4<f32> {
        &self.b_to_a
    }

    pub fn model_matrix(&self, endpoint: PortalEndpoint) -> &Matrix4<f32> {
        match endpoint {
            PortalEndpoint::A => &self.a_transform,
            PortalEndpoint::B => &self.b_transform,
        }
    }

    pub fn inverse_model_matrix(&self, endpoint: PortalEndpoint) -> &Matrix4<f32> {
        match endpoint {
            PortalEndpoint::A => &self.a_inverse,
            PortalEndpoint::B => &self.b_inverse,
        }
    }

    /// Transform applied to whatever passes through `endpoint`
    pub fn endpoint_transform(&self, endpoint: PortalEndpoint) -> &Matrix4<f32> {
        match endpoint {
            PortalEndpoint::A => &self.a_to_b,
            PortalEndpoint::B => &self.b_to_a,
        }
    }
}

/// Nearest portal crossing along a movement ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalRayTraceResult {
    /// World space distance from the ray origin
    pub distance: f32,
    pub portal_index: usize,
    pub endpoint: PortalEndpoint,
    pub world_hit_location: Point3<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Quaternion, Rotation3, Transform as _, Vector3};

    fn assert_matrix_near(a: &Matrix4<f32>, b: &Matrix4<f32>) {
        let a: [[f32; 4]; 4] = (*a).into();
        let b: [[f32; 4]; 4] = (*b).into();
        for col in 0..4 {
            for row in 0..4 {
                assert!(
                    (a[col][row] - b[col][row]).abs() < 1e-4,
                    "{:?} != {:?}",
                    a,
                    b
                );
            }
        }
    }

    fn sample_portal() -> Portal {
        let a = Transform::new(
            Vector3::new(3.0, 0.0, -2.0),
            Vector3::new(1.0, 2.0, 1.0),
            Quaternion::from_angle_y(Deg(30.0)),
        );
        let b = Transform::new(
            Vector3::new(-5.0, 1.0, 4.0),
            Vector3::new(1.0, 2.0, 1.0),
            Quaternion::from_angle_y(Deg(-120.0)),
        );
        Portal::create_with_portal_transforms(0, &a, &b).expect("invertible")
    }

    #[test]
    fn test_a_to_b_and_b_to_a_are_inverse() {
        let portal = sample_portal();
        assert_matrix_near(&(portal.a_to_b() * portal.b_to_a()), &Matrix4::identity());
        assert_matrix_near(&(portal.b_to_a() * portal.a_to_b()), &Matrix4::identity());
    }

    #[test]
    fn test_a_to_b_maps_a_onto_b() {
        let portal = sample_portal();
        assert_matrix_near(
            &(portal.a_to_b() * portal.model_matrix(PortalEndpoint::A)),
            portal.model_matrix(PortalEndpoint::B),
        );

        let point = Point3::new(0.25, 0.5, 0.0);
        let on_a = portal.model_matrix(PortalEndpoint::A).transform_point(point);
        let on_b = portal.endpoint_transform(PortalEndpoint::A).transform_point(on_a);
        let expected = portal.model_matrix(PortalEndpoint::B).transform_point(point);
        assert!((on_b.x - expected.x).abs() < 1e-4);
        assert!((on_b.y - expected.y).abs() < 1e-4);
        assert!((on_b.z - expected.z).abs() < 1e-4);
    }

    #[test]
    fn test_create_with_translation_matches_model_mats() {
        let a = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let a_to_b = Matrix4::from_translation(Vector3::new(0.0, 0.0, 10.0));
        let portal = Portal::create_with_model_mat_and_translation(4, a, a_to_b).expect("invertible");

        assert_eq!(portal.mesh_index(), 4);
        assert_matrix_near(
            portal.model_matrix(PortalEndpoint::B),
            &Matrix4::from_translation(Vector3::new(1.0, 2.0, 13.0)),
        );

        let same = Portal::create_with_model_mats(4, a, *portal.model_matrix(PortalEndpoint::B)).expect("invertible");
        assert_matrix_near(same.a_to_b(), portal.a_to_b());
        assert_matrix_near(same.b_to_a(), portal.b_to_a());
    }

    #[test]
    fn test_inverse_model_matrices() {
        let portal = sample_portal();
        for endpoint in PortalEndpoint::ALL {
            assert_matrix_near(
                &(portal.model_matrix(endpoint) * portal.inverse_model_matrix(endpoint)),
                &Matrix4::identity(),
            );
        }
    }

    #[test]
    fn test_singular_transform_is_an_error() {
        let flat = Transform::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 1.0),
            Quaternion::from_angle_y(Deg(0.0)),
        );
        let result = Portal::create_with_portal_transforms(0, &flat, &Transform::default());
        assert!(matches!(result, Err(PortalError::SingularTransform { .. })));
    }

    #[test]
    fn test_endpoint_child_num() {
        assert_eq!(PortalEndpoint::A.child_num(0), 0);
        assert_eq!(PortalEndpoint::B.child_num(0), 1);
        assert_eq!(PortalEndpoint::B.child_num(3), 7);
        assert_eq!(PortalEndpoint::A.other(), PortalEndpoint::B);
    }
}
