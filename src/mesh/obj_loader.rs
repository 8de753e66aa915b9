//! Wavefront OBJ import
//!
//! Only vertex positions (`v`) and faces (`f`) are read. Normals, texture
//! coordinates, groups and materials are skipped. Polygon faces are fan
//! triangulated around their first vertex.

use std::path::Path;

use cgmath::Point3;

use super::triangle_mesh::TriangleMesh;
use crate::error::{PortalError, PortalResult};
use crate::geometry::Triangle;

/// Reads and parses an OBJ file into a mesh
pub fn load_obj(path: impl AsRef<Path>) -> PortalResult<TriangleMesh> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| PortalError::io(path, e))?;
    let mesh = parse_obj_source(&source, path)?;

    log::info!(
        "[load_obj] Loaded {} triangles from {}",
        mesh.triangle_count(),
        path.display()
    );
    Ok(mesh)
}

/// Parses OBJ text that did not come from a file
pub fn parse_obj(source: &str) -> PortalResult<TriangleMesh> {
    parse_obj_source(source, Path::new("<memory>"))
}

fn parse_obj_source(source: &str, path: &Path) -> PortalResult<TriangleMesh> {
    let mut positions: Vec<Point3<f32>> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();

    for (line_index, line) in source.lines().enumerate() {
        let line_number = line_index + 1;
        let parse_error = |reason: String| PortalError::MeshParse {
            path: path.to_path_buf(),
            line: line_number,
            reason,
        };

        let content = line.split('#').next().unwrap_or("").trim();
        let mut tokens = content.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let mut coords = [0.0f32; 3];
                for coord in &mut coords {
                    let token = tokens
                        .next()
                        .ok_or_else(|| parse_error("vertex needs 3 coordinates".to_string()))?;
                    *coord = token
                        .parse()
                        .map_err(|_| parse_error(format!("invalid coordinate '{}'", token)))?;
                }
                positions.push(Point3::new(coords[0], coords[1], coords[2]));
            }
            "f" => {
                let face = tokens
                    .map(|token| resolve_face_index(token, positions.len()).map_err(&parse_error))
                    .collect::<PortalResult<Vec<usize>>>()?;

                if face.len() < 3 {
                    return Err(parse_error(format!("face has {} vertices", face.len())));
                }

                for i in 1..face.len() - 1 {
                    triangles.push(Triangle::new(
                        positions[face[0]],
                        positions[face[i]],
                        positions[face[i + 1]],
                    ));
                }
            }
            _ => {}
        }
    }

    Ok(TriangleMesh::from_triangles(triangles))
}

/// Resolves one `v`, `v/vt`, `v//vn` or `v/vt/vn` face token to a zero based
/// position index. Negative indices count back from the last vertex read.
fn resolve_face_index(token: &str, vertex_count: usize) -> Result<usize, String> {
    let position_token = token.split('/').next().unwrap_or("");
    let index: i64 = position_token
        .parse()
        .map_err(|_| format!("invalid face index '{}'", token))?;

    let resolved = if index > 0 {
        index - 1
    } else if index < 0 {
        vertex_count as i64 + index
    } else {
        return Err("face index 0 is not valid".to_string());
    };

    if resolved < 0 || resolved >= vertex_count as i64 {
        return Err(format!(
            "face index {} out of range for {} vertices",
            index, vertex_count
        ));
    }
    Ok(resolved as usize)
}
