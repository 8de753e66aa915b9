//! Level loading operations - Pure functions over `LevelDescription`

use std::path::Path;

use super::level_data::LevelDescription;
use crate::error::{PortalError, PortalResult};
use crate::mesh::{load_obj, TriangleMesh};
use crate::portal::{Portal, PortalManager};

/// Parses and validates a level from TOML text
pub fn parse_level(source: &str) -> PortalResult<LevelDescription> {
    let level: LevelDescription = toml::from_str(source)?;
    validate_level(&level)?;
    Ok(level)
}

pub fn load_level(path: impl AsRef<Path>) -> PortalResult<LevelDescription> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| PortalError::io(path, e))?;
    let level = parse_level(&source)?;

    log::info!(
        "[load_level] Loaded {} with {} meshes, {} objects, {} portals, {} cameras",
        path.display(),
        level.meshes.len(),
        level.objects.len(),
        level.portals.len(),
        level.cameras.len()
    );
    Ok(level)
}

/// Checks every mesh reference against the mesh list
pub fn validate_level(level: &LevelDescription) -> PortalResult<()> {
    let mesh_count = level.meshes.len();

    for object in &level.objects {
        if object.mesh_index >= mesh_count {
            return Err(PortalError::InvalidLevel(format!(
                "object '{}' uses mesh {} but only {} meshes are listed",
                object.name, object.mesh_index, mesh_count
            )));
        }
    }

    for portal in &level.portals {
        if portal.mesh_index >= mesh_count {
            return Err(PortalError::InvalidLevel(format!(
                "portal '{}' uses mesh {} but only {} meshes are listed",
                portal.name, portal.mesh_index, mesh_count
            )));
        }
    }

    Ok(())
}

/// Creates a portal manager holding every portal of the level, in file order
pub fn build_portal_manager(level: &LevelDescription) -> PortalResult<PortalManager> {
    let mut manager = PortalManager::new();
    for portal in &level.portals {
        let created = Portal::create_with_portal_transforms(
            portal.mesh_index,
            &portal.transform_a.to_transform(),
            &portal.transform_b.to_transform(),
        )
        .map_err(|e| PortalError::InvalidLevel(format!("portal '{}': {}", portal.name, e)))?;
        manager.add(created);
    }
    Ok(manager)
}

/// Loads every mesh of the level, resolving file names against `base_dir`
pub fn load_level_meshes(level: &LevelDescription, base_dir: impl AsRef<Path>) -> PortalResult<Vec<TriangleMesh>> {
    let base_dir = base_dir.as_ref();
    level
        .meshes
        .iter()
        .map(|file_name| load_obj(base_dir.join(file_name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::PortalEndpoint;
    use cgmath::{Matrix4, Vector3};

    const LEVEL: &str = r#"
meshes = ["portal.obj", "room.obj"]

[[objects]]
mesh_index = 1
name = "room"

[[portals]]
mesh_index = 0
name = "doorway"
transform_a = { position = [0.0, 0.0, -2.0] }
transform_b = { position = [10.0, 0.0, -2.0], rotation = [0.0, 1.0, 0.0, 0.0] }

[[cameras]]
position = [0.0, 1.0, 5.0]
target = [0.0, 1.0, 0.0]
"#;

    #[test]
    fn test_parse_level() {
        let level = parse_level(LEVEL).expect("valid level");
        assert_eq!(level.meshes, vec!["portal.obj", "room.obj"]);
        assert_eq!(level.objects[0].transform.scale, [1.0, 1.0, 1.0]);
        assert_eq!(level.portals[0].transform_b.rotation, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(level.cameras[0].target(), cgmath::Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_build_portal_manager() {
        let level = parse_level(LEVEL).expect("valid level");
        let manager = build_portal_manager(&level).expect("invertible transforms");
        assert_eq!(manager.portal_count(), 1);

        let portal = &manager.portals()[0];
        let expected_a: [[f32; 4]; 4] = Matrix4::from_translation(Vector3::new(0.0, 0.0, -2.0)).into();
        let actual_a: [[f32; 4]; 4] = (*portal.model_matrix(PortalEndpoint::A)).into();
        assert_eq!(actual_a, expected_a);
    }

    #[test]
    fn test_unknown_mesh_index_is_rejected() {
        let source = r#"
meshes = ["portal.obj"]

[[portals]]
mesh_index = 3
name = "broken"
transform_a = { position = [0.0, 0.0, 0.0] }
transform_b = { position = [1.0, 0.0, 0.0] }
"#;
        assert!(matches!(parse_level(source), Err(PortalError::InvalidLevel(_))));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            parse_level("meshes = [\"a.obj\""),
            Err(PortalError::Deserialization { .. })
        ));
    }

    #[test]
    fn test_singular_portal_transform() {
        let source = r#"
meshes = ["portal.obj"]

[[portals]]
mesh_index = 0
name = "flat"
transform_a = { position = [0.0, 0.0, 0.0], scale = [0.0, 1.0, 1.0] }
transform_b = { position = [1.0, 0.0, 0.0] }
"#;
        let level = parse_level(source).expect("valid toml");
        assert!(matches!(build_portal_manager(&level), Err(PortalError::InvalidLevel(_))));
    }
}
