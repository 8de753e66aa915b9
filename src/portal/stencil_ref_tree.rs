//! Stencil reference values for a pruned portal recursion tree
//!
//! Every node below the root camera gets an 8 bit stencil value. Each layer
//! owns a bit field above its parent's bits holding the 1 based id of the
//! portal among the visible ones, so the value 0 always means "no portal".

use crate::constants::stencil::STENCIL_BIT_COUNT;

/// Bits needed to store the ids `1..=visible_portal_count`
pub(crate) fn bits_for_layer(visible_portal_count: u32) -> u32 {
    u32::BITS - visible_portal_count.leading_zeros()
}

#[derive(Debug, Clone, Default)]
pub struct StencilRefTree {
    visible_portal_count_for_layer: Vec<u32>,
    stencil_refs: Vec<u8>,
    compare_mask_for_layer: Vec<u8>,
}

impl StencilRefTree {
    pub fn new(visible_portal_count_for_layer: &[u32]) -> Self {
        let mut tree = Self::default();
        tree.recalc_tree(visible_portal_count_for_layer);
        tree
    }

    /// Rebuilds every stencil value and compare mask for new per-layer portal counts
    ///
    /// Panics if the layers together need more than the 8 stencil bits.
    pub fn recalc_tree(&mut self, visible_portal_count_for_layer: &[u32]) {
        self.visible_portal_count_for_layer.clear();
        self.visible_portal_count_for_layer
            .extend_from_slice(visible_portal_count_for_layer);

        let layer_count = visible_portal_count_for_layer.len();
        let total_bits: u32 = visible_portal_count_for_layer
            .iter()
            .map(|&count| bits_for_layer(count))
            .sum();
        assert!(
            total_bits <= STENCIL_BIT_COUNT,
            "visible portal counts {:?} need {} stencil bits, only {} available",
            visible_portal_count_for_layer,
            total_bits,
            STENCIL_BIT_COUNT
        );

        self.stencil_refs.clear();
        self.stencil_refs.reserve(self.calc_layer_start_index(layer_count));
        self.compare_mask_for_layer.clear();

        let mut bits_to_shift = 0;
        let mut previous_layer_start = 0;

        for layer in 0..layer_count {
            let portal_count = visible_portal_count_for_layer[layer];
            let layer_bits = bits_for_layer(portal_count);

            // low bits of every layer up to and including this one
            let compare_mask = ((1u32 << (bits_to_shift + layer_bits)) - 1) as u8;
            self.compare_mask_for_layer.push(compare_mask);

            if layer == 0 {
                for id in 1..=portal_count {
                    self.stencil_refs.push(id as u8);
                }
            } else {
                let layer_start = self.stencil_refs.len();
                for parent_idx in previous_layer_start..layer_start {
                    let parent_ref = self.stencil_refs[parent_idx];
                    debug_assert!(parent_ref != 0);
                    debug_assert!(parent_ref & !compare_mask == 0);

                    for id in 1..=portal_count {
                        let shifted_id = (id << bits_to_shift) as u8;
                        debug_assert!(parent_ref & shifted_id == 0);
                        self.stencil_refs.push(parent_ref | shifted_id);
                    }
                }
                previous_layer_start = layer_start;
            }

            bits_to_shift += layer_bits;
        }

        log::debug!(
            "[StencilRefTree::recalc_tree] {} layers, {} stencil refs, {} bits used",
            layer_count,
            self.stencil_refs.len(),
            total_bits
        );
    }

    pub fn get_stencil_refs_for_layer(&self, layer_num: usize) -> &[u8] {
        let start = self.calc_layer_start_index(layer_num);
        &self.stencil_refs[start..start + self.calc_layer_element_count(layer_num)]
    }

    pub fn get_layer_compare_mask(&self, layer_num: usize) -> u8 {
        self.compare_mask_for_layer[layer_num]
    }

    pub fn get_visible_portal_count_for_layer(&self, layer_num: usize) -> u32 {
        self.visible_portal_count_for_layer[layer_num]
    }

    pub fn layer_count(&self) -> usize {
        self.visible_portal_count_for_layer.len()
    }

    /// Sum of the element counts of all layers before `layer_num`
    pub fn calc_layer_start_index(&self, layer_num: usize) -> usize {
        (0..layer_num)
            .map(|layer| self.calc_layer_element_count(layer))
            .sum()
    }

    /// Product of the visible portal counts of layers `0..=layer_num`
    pub fn calc_layer_element_count(&self, layer_num: usize) -> usize {
        self.visible_portal_count_for_layer[..=layer_num]
            .iter()
            .map(|&count| count as usize)
            .product()
    }

    /// Bits taken by the ancestors of layer `layer_num`, the shift applied
    /// to a child id before it is combined with its parent's value
    pub fn calc_stencil_shift_bits_for_layer(&self, layer_num: usize) -> u32 {
        self.visible_portal_count_for_layer[..layer_num]
            .iter()
            .map(|&count| bits_for_layer(count))
            .sum()
    }

    pub fn get_camera_index_buffer_element_count(&self) -> usize {
        self.stencil_refs.len()
    }
}
