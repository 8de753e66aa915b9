//! Camera index buffer layout for a pruned recursion tree
//!
//! Same layer flattening as the stencil tree, but the root camera occupies
//! index 0, so the first portal layer starts at index 1.

/// Product of the visible portal counts of layers `0..=layer_num`
pub fn calc_layer_element_count(layer_num: usize, visible_portal_count_for_layer: &[u32]) -> usize {
    visible_portal_count_for_layer[..=layer_num]
        .iter()
        .map(|&count| count as usize)
        .product()
}

pub fn calc_layer_start_index(layer_num: usize, visible_portal_count_for_layer: &[u32]) -> usize {
    1 + (0..layer_num)
        .map(|layer| calc_layer_element_count(layer, visible_portal_count_for_layer))
        .sum::<usize>()
}

/// Root camera plus every node of every layer
pub fn get_camera_index_buffer_element_count(visible_portal_count_for_layer: &[u32]) -> usize {
    calc_layer_start_index(visible_portal_count_for_layer.len(), visible_portal_count_for_layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::StencilRefTree;

    #[test]
    fn test_layout() {
        let counts = [4, 2];
        assert_eq!(calc_layer_start_index(0, &counts), 1);
        assert_eq!(calc_layer_element_count(0, &counts), 4);
        assert_eq!(calc_layer_start_index(1, &counts), 5);
        assert_eq!(calc_layer_element_count(1, &counts), 8);
        assert_eq!(get_camera_index_buffer_element_count(&counts), 13);
    }

    #[test]
    fn test_root_only() {
        assert_eq!(get_camera_index_buffer_element_count(&[]), 1);
    }

    #[test]
    fn test_offset_from_stencil_tree_by_root() {
        let counts = [3, 2, 1];
        let stencil_tree = StencilRefTree::new(&counts);
        for layer in 0..counts.len() {
            assert_eq!(
                calc_layer_start_index(layer, &counts),
                stencil_tree.calc_layer_start_index(layer) + 1
            );
        }
        assert_eq!(
            get_camera_index_buffer_element_count(&counts),
            stencil_tree.get_camera_index_buffer_element_count() + 1
        );
    }
}
