// Recursive Portals - Data-Oriented Programming (DOP) Architecture
//
// CPU side of a recursive portal renderer:
// - geometry + spatial: triangles, bounding boxes and a kd-tree for ray queries
// - mesh: triangle meshes with OBJ import
// - portal: virtual camera tree, stencil values and portal crossing queries
// - level + config: file formats driving the above
//
// Data lives in plain structs (*_data modules), behavior in pure functions
// (*_operations modules) wherever no invariant needs protecting.

// Constants module
pub mod constants;

// Core modules
pub mod config;
pub mod error;

// Geometry and acceleration
pub mod geometry;
pub mod mesh;
pub mod spatial;

// Portal rendering
pub mod level;
pub mod portal;

pub use config::PortalRenderConfig;
pub use error::{PortalError, PortalResult};
pub use geometry::{Ray, Transform, Triangle, AABB};
pub use level::{build_portal_manager, load_level, load_level_meshes, parse_level, LevelDescription};
pub use mesh::{load_obj, parse_obj, TriangleMesh};
pub use portal::{
    Portal, PortalEndpoint, PortalManager, PortalRayTraceResult, StencilRefTree,
};
pub use spatial::{build_kd_tree, KdNode, KdTree, SplitAxis};
