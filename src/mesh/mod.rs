//! Triangle meshes used as portal and level geometry

pub mod obj_loader;
pub mod triangle_mesh;

pub use obj_loader::{load_obj, parse_obj};
pub use triangle_mesh::TriangleMesh;
