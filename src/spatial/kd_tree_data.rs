//! Kd-tree data - Pure DOP
//!
//! Plain storage for the spatial index. Building happens in
//! kd_tree_operations.rs, ray queries in kd_tree_traverser.rs.

use super::kd_node::{KdNode, NodeIndex, NodePairIndex};

/// Append-only node storage. Nodes are addressed by index and never freed
/// individually, children are always handed out as contiguous pairs.
#[derive(Debug, Clone, Default)]
pub struct KdNodeArena {
    pub nodes: Vec<KdNode>,
}

/// Narrows a node or triangle count to the u32 indices the tree stores
///
/// # Panics
/// If `count` does not fit in a u32.
pub(crate) fn to_index(count: usize) -> u32 {
    u32::try_from(count).expect("kd-tree holds more than u32::MAX entries")
}

impl KdNodeArena {
    pub fn alloc_node_pair(&mut self) -> NodePairIndex {
        let first = to_index(self.nodes.len());
        assert!(first < u32::MAX, "kd-tree node arena is full");
        let first = NodeIndex(first);
        self.nodes.push(KdNode::default());
        self.nodes.push(KdNode::default());
        NodePairIndex { first }
    }

    pub fn get(&self, index: NodeIndex) -> &KdNode {
        &self.nodes[index.0 as usize]
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> &mut KdNode {
        &mut self.nodes[index.0 as usize]
    }
}

/// Median split kd-tree over a borrowed triangle set
///
/// The tree only stores indices into the triangle slice it was built from,
/// it never copies geometry. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct KdTree {
    pub root: KdNode,
    pub node_memory: KdNodeArena,
    /// Shared by all leaves, each leaf references a sub range
    pub data_indices: Vec<u32>,
    pub max_depth: u32,
}

/// Kd-tree statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdTreeStats {
    /// Nodes including the root
    pub node_count: usize,
    pub leaf_count: usize,
    pub max_depth: u32,
    /// Triangle references over all leaves, straddling triangles count once per leaf
    pub data_index_count: usize,
}
