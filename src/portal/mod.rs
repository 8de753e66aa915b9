//! Portals - camera recursion tree, stencil values and crossing queries

pub mod debug_colors;
pub mod n_tree;
pub mod portal_data;
pub mod portal_manager;
pub mod recursion_tree;
pub mod stencil_ref_tree;

pub use debug_colors::{debug_color_for_camera, DEBUG_COLORS};
pub use portal_data::{Portal, PortalEndpoint, PortalRayTraceResult};
pub use portal_manager::PortalManager;
pub use stencil_ref_tree::StencilRefTree;
