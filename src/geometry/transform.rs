use cgmath::{Matrix4, One, Quaternion, Vector3};

/// Translation, non-uniform scale and rotation of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Quaternion::one(),
        }
    }
}

impl Transform {
    pub fn new(translation: Vector3<f32>, scale: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self {
            translation,
            scale,
            rotation,
        }
    }

    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Model matrix, scale first, then rotation, then translation
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}
