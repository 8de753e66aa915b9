//! Level files - meshes, static objects, portals and cameras

pub mod level_data;
pub mod level_operations;

pub use level_data::{CameraObject, LevelDescription, LevelObject, PortalObject, TransformDescriptor};
pub use level_operations::{build_portal_manager, load_level, load_level_meshes, parse_level, validate_level};
