use bytemuck::{Pod, Zeroable};

use super::split_axis::SplitAxis;
use crate::constants::kd_tree::SPLIT_AXIS_BITS;

/// Index of a node in the kd-tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(pub u32);

/// Two contiguous arena slots, always allocated together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePairIndex {
    pub first: NodeIndex,
}

impl NodePairIndex {
    pub fn first(self) -> NodeIndex {
        self.first
    }

    pub fn second(self) -> NodeIndex {
        NodeIndex(self.first.0 + 1)
    }

    /// 0 selects the first child, 1 the second
    pub fn child(self, child_num: usize) -> NodeIndex {
        debug_assert!(child_num < 2);
        NodeIndex(self.first.0 + child_num as u32)
    }
}

/// Range into the tree's shared data index array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DataIndicesView {
    pub first_index: u32,
    pub size: u32,
}

/// Kd-tree node: either a split plane with a child pair, or a leaf range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KdNode {
    Leaf(DataIndicesView),
    Internal {
        axis: SplitAxis,
        split_value: f32,
        children: NodePairIndex,
    },
}

impl Default for KdNode {
    fn default() -> Self {
        KdNode::Leaf(DataIndicesView::default())
    }
}

impl KdNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, KdNode::Leaf(_))
    }

    /// GPU layout of this node
    pub fn pack(&self) -> PackedKdNode {
        match *self {
            KdNode::Leaf(view) => {
                assert!(
                    view.first_index & PackedKdNode::TAG_MASK == 0,
                    "data index view index {} too large for packed node",
                    view.first_index
                );
                PackedKdNode {
                    index_and_tag: view.first_index | (PackedKdNode::LEAF_TAG << PackedKdNode::TAG_SHIFT),
                    split_value_or_size: view.size,
                }
            }
            KdNode::Internal {
                axis,
                split_value,
                children,
            } => {
                assert!(
                    children.first.0 & PackedKdNode::TAG_MASK == 0,
                    "node index {} too large for packed node",
                    children.first.0
                );
                PackedKdNode {
                    index_and_tag: children.first.0 | ((axis as u32) << PackedKdNode::TAG_SHIFT),
                    split_value_or_size: split_value.to_bits(),
                }
            }
        }
    }
}

/// 8 byte node encoding for upload
///
/// The top 2 bits of `index_and_tag` hold the tag (0..=2 split axis, 3 leaf),
/// the remaining 30 bits the child pair index or the first data index.
/// `split_value_or_size` carries the split value bits or the leaf size.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedKdNode {
    pub index_and_tag: u32,
    pub split_value_or_size: u32,
}

static_assertions::assert_eq_size!(PackedKdNode, [u32; 2]);
static_assertions::const_assert!(SPLIT_AXIS_BITS == 2);

impl PackedKdNode {
    const TAG_SHIFT: u32 = u32::BITS - SPLIT_AXIS_BITS;
    const TAG_MASK: u32 = !0u32 << Self::TAG_SHIFT;
    const LEAF_TAG: u32 = 3;

    pub fn unpack(&self) -> KdNode {
        let tag = self.index_and_tag >> Self::TAG_SHIFT;
        let index = self.index_and_tag & !Self::TAG_MASK;
        if tag == Self::LEAF_TAG {
            KdNode::Leaf(DataIndicesView {
                first_index: index,
                size: self.split_value_or_size,
            })
        } else {
            KdNode::Internal {
                axis: SplitAxis::from_dim(tag as usize),
                split_value: f32::from_bits(self.split_value_or_size),
                children: NodePairIndex {
                    first: NodeIndex(index),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_index() {
        let pair = NodePairIndex { first: NodeIndex(6) };
        assert_eq!(pair.first(), NodeIndex(6));
        assert_eq!(pair.second(), NodeIndex(7));
        assert_eq!(pair.child(1), pair.second());
    }

    #[test]
    fn test_pack_unpack() {
        let nodes = [
            KdNode::Leaf(DataIndicesView {
                first_index: 12,
                size: 5,
            }),
            KdNode::Internal {
                axis: SplitAxis::Z,
                split_value: -3.25,
                children: NodePairIndex { first: NodeIndex(41) },
            },
            KdNode::Internal {
                axis: SplitAxis::X,
                split_value: 0.0,
                children: NodePairIndex { first: NodeIndex(1) },
            },
        ];
        for node in nodes {
            assert_eq!(node.pack().unpack(), node);
        }
    }

    #[test]
    fn test_packed_tag_bits() {
        let leaf = KdNode::Leaf(DataIndicesView {
            first_index: 1,
            size: 2,
        })
        .pack();
        assert_eq!(leaf.index_and_tag >> 30, 3);

        let packed = [leaf, leaf];
        let bytes: &[u8] = bytemuck::cast_slice(&packed);
        assert_eq!(bytes.len(), 16);
    }

    #[test]
    #[should_panic]
    fn test_leaf_index_overflow_panics() {
        KdNode::Leaf(DataIndicesView {
            first_index: 1 << 30,
            size: 1,
        })
        .pack();
    }
}
