//! Level description data - Pure DOP
//!
//! Plain serde structs mirroring the level TOML file. Conversion into runtime
//! types happens in level_operations.rs.

use cgmath::{Point3, Quaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::geometry::Transform;

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

/// Transform as written in a level file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformDescriptor {
    pub position: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// Quaternion as `[x, y, z, w]`
    #[serde(default = "default_rotation")]
    pub rotation: [f32; 4],
}

impl Default for TransformDescriptor {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            scale: default_scale(),
            rotation: default_rotation(),
        }
    }
}

impl TransformDescriptor {
    pub fn to_transform(&self) -> Transform {
        let [x, y, z, w] = self.rotation;
        Transform::new(
            Vector3::from(self.position),
            Vector3::from(self.scale),
            Quaternion::new(w, x, y, z),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelObject {
    pub mesh_index: usize,
    pub name: String,
    #[serde(default)]
    pub transform: TransformDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalObject {
    pub mesh_index: usize,
    pub name: String,
    pub transform_a: TransformDescriptor,
    pub transform_b: TransformDescriptor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraObject {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl CameraObject {
    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.position)
    }

    pub fn target(&self) -> Point3<f32> {
        Point3::from(self.target)
    }
}

/// Everything a level file describes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelDescription {
    /// OBJ files, relative to the level file
    #[serde(default)]
    pub meshes: Vec<String>,
    #[serde(default)]
    pub objects: Vec<LevelObject>,
    #[serde(default)]
    pub portals: Vec<PortalObject>,
    #[serde(default)]
    pub cameras: Vec<CameraObject>,
}
