//! Kd-tree Operations - Pure DOP Functions
//!
//! Building and inspecting the spatial index. The tree is built once from a
//! triangle slice and only read afterwards.

use super::kd_node::{DataIndicesView, KdNode, NodeIndex, PackedKdNode};
use super::kd_tree_data::{to_index, KdTree, KdTreeStats};
use super::split_axis::SplitAxis;
use crate::constants::kd_tree::{KD_TREE_MAX_DEPTH, MAX_INDICES_PER_NODE};
use crate::geometry::{
    aabb_extent, aabb_find_widest_dim, aabb_is_valid, triangle_centroid, triangle_dim_range,
    Triangle, AABB,
};

// ============================================================================
// BUILD
// ============================================================================

/// Build a kd-tree over `triangles`
///
/// `hint_bounding_box` lets the caller reuse a box it already computed for the
/// same triangles. An invalid hint is ignored.
pub fn build_kd_tree(triangles: &[Triangle], hint_bounding_box: Option<&AABB>) -> KdTree {
    let element_count = triangles.len();
    let mut tree = KdTree::default();

    let element_count_u32 = to_index(element_count);

    if element_count == 0 {
        tree.root = KdNode::Leaf(DataIndicesView::default());
        return tree;
    }

    // too few elements for a real tree
    if element_count <= MAX_INDICES_PER_NODE {
        tree.data_indices = (0..element_count_u32).collect();
        tree.root = KdNode::Leaf(DataIndicesView {
            first_index: 0,
            size: element_count_u32,
        });
        return tree;
    }

    let bounding_box = hint_bounding_box
        .copied()
        .filter(aabb_is_valid)
        .unwrap_or_else(|| Triangle::create_aabb(triangles));

    let initial_indices: Vec<u32> = (0..element_count_u32).collect();
    let root = build_recursive(
        &mut tree,
        triangles,
        &bounding_box,
        initial_indices,
        SplitAxis::X,
        0,
    );
    tree.root = root;

    let stats = kd_tree_stats(&tree);
    log::debug!(
        "[build_kd_tree] {} triangles -> {} nodes, {} leaves, depth {}, {} data indices",
        element_count,
        stats.node_count,
        stats.leaf_count,
        stats.max_depth,
        stats.data_index_count
    );

    tree
}

/// Result of partitioning a node's indices at the median centroid
struct SplitResult {
    first: Vec<u32>,
    second: Vec<u32>,
    split_value: f32,
}

fn build_recursive(
    tree: &mut KdTree,
    triangles: &[Triangle],
    bounding_box: &AABB,
    mut indices: Vec<u32>,
    next_axis_hint: SplitAxis,
    depth: u32,
) -> KdNode {
    tree.max_depth = tree.max_depth.max(depth);

    if indices.len() <= MAX_INDICES_PER_NODE {
        return create_leaf(tree, &indices);
    }

    if depth >= KD_TREE_MAX_DEPTH {
        log::debug!(
            "[build_kd_tree] depth limit {} reached, leaf with {} indices",
            KD_TREE_MAX_DEPTH,
            indices.len()
        );
        return create_leaf(tree, &indices);
    }

    let axis = choose_split_axis(bounding_box, next_axis_hint);
    let split = split_indices(axis, &mut indices, triangles);

    // straddling triangles are duplicated, a side that keeps everything makes no progress
    if split.first.len() == indices.len() || split.second.len() == indices.len() {
        return create_leaf(tree, &indices);
    }

    let children = tree.node_memory.alloc_node_pair();

    let dim = axis.dim();
    let mut first_bounding_box = *bounding_box;
    first_bounding_box.max[dim] = split.split_value;
    let mut second_bounding_box = *bounding_box;
    second_bounding_box.min[dim] = split.split_value;

    let child_hint = axis.next_axis();
    let first = build_recursive(
        tree,
        triangles,
        &first_bounding_box,
        split.first,
        child_hint,
        depth + 1,
    );
    *tree.node_memory.get_mut(children.first()) = first;

    let second = build_recursive(
        tree,
        triangles,
        &second_bounding_box,
        split.second,
        child_hint,
        depth + 1,
    );
    *tree.node_memory.get_mut(children.second()) = second;

    KdNode::Internal {
        axis,
        split_value: split.split_value,
        children,
    }
}

/// Widest axis of the node box. The hint only decides for boxes without any extent.
fn choose_split_axis(bounding_box: &AABB, next_axis_hint: SplitAxis) -> SplitAxis {
    let extent = aabb_extent(bounding_box);
    if extent.x <= 0.0 && extent.y <= 0.0 && extent.z <= 0.0 {
        return next_axis_hint;
    }
    aabb_find_widest_dim(bounding_box)
}

fn split_indices(axis: SplitAxis, indices: &mut [u32], triangles: &[Triangle]) -> SplitResult {
    let dim = axis.dim();
    let median = indices.len() / 2;

    indices.select_nth_unstable_by(median, |&a, &b| {
        let centroid_a = triangle_centroid(&triangles[a as usize], dim);
        let centroid_b = triangle_centroid(&triangles[b as usize], dim);
        centroid_a.total_cmp(&centroid_b)
    });

    let split_value = triangle_centroid(&triangles[indices[median] as usize], dim);

    let mut result = SplitResult {
        first: Vec::with_capacity(indices.len()),
        second: Vec::with_capacity(indices.len()),
        split_value,
    };

    for &index in indices.iter() {
        let (low, high) = triangle_dim_range(&triangles[index as usize], dim);
        if low <= split_value {
            result.first.push(index);
        }
        if high >= split_value {
            result.second.push(index);
        }
    }

    result
}

fn create_leaf(tree: &mut KdTree, indices: &[u32]) -> KdNode {
    let first_index = to_index(tree.data_indices.len());
    let size = to_index(indices.len());
    assert!(
        first_index.checked_add(size).is_some(),
        "kd-tree data indices exceed u32::MAX"
    );
    tree.data_indices.extend_from_slice(indices);
    KdNode::Leaf(DataIndicesView { first_index, size })
}

// ============================================================================
// ACCESS
// ============================================================================

/// Triangle indices referenced by a leaf
pub fn get_data_indices(tree: &KdTree, view: DataIndicesView) -> &[u32] {
    let start = view.first_index as usize;
    let end = start + view.size as usize;
    assert!(
        end <= tree.data_indices.len(),
        "leaf range {}..{} exceeds {} data indices",
        start,
        end,
        tree.data_indices.len()
    );
    &tree.data_indices[start..end]
}

pub fn get_node(tree: &KdTree, index: NodeIndex) -> &KdNode {
    tree.node_memory.get(index)
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

pub fn kd_tree_stats(tree: &KdTree) -> KdTreeStats {
    let all_nodes = std::iter::once(&tree.root).chain(tree.node_memory.nodes.iter());
    let (node_count, leaf_count) = all_nodes.fold((0, 0), |(nodes, leaves), node| {
        (nodes + 1, leaves + usize::from(node.is_leaf()))
    });

    KdTreeStats {
        node_count,
        leaf_count,
        max_depth: tree.max_depth,
        data_index_count: tree.data_indices.len(),
    }
}

/// Packed root plus the packed arena, child indices refer to the arena
pub fn pack_kd_tree_nodes(tree: &KdTree) -> (PackedKdNode, Vec<PackedKdNode>) {
    let arena = tree.node_memory.nodes.iter().map(KdNode::pack).collect();
    (tree.root.pack(), arena)
}
