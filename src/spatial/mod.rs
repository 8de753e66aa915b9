//! Spatial acceleration - median split kd-tree over triangle sets

pub mod kd_node;
pub mod kd_tree_data;
pub mod kd_tree_operations;
pub mod kd_tree_traverser;
pub mod split_axis;

pub use kd_node::{DataIndicesView, KdNode, NodeIndex, NodePairIndex, PackedKdNode};
pub use kd_tree_data::{KdNodeArena, KdTree, KdTreeStats};
pub use kd_tree_operations::{
    build_kd_tree, get_data_indices, get_node, kd_tree_stats, pack_kd_tree_nodes,
};
pub use kd_tree_traverser::{
    brute_force_ray_trace, ray_tolerance, ray_trace, RayTraceData, RayTraceResult,
};
pub use split_axis::SplitAxis;
