//! Flat array layout for a complete tree with a fixed branching factor
//!
//! Layer 0 holds the single root at index 0, layer `l` holds `n^l` elements
//! stored right after layer `l - 1`. Children of one parent are contiguous.

/// Index of the first element of `layer`
pub fn calc_first_layer_index(n: usize, layer: usize) -> usize {
    let mut result = 0;
    for _ in 0..layer {
        result = result * n + 1;
    }
    result
}

/// Number of elements in a tree with `height` layers
pub fn calc_total_elements(n: usize, height: usize) -> usize {
    calc_first_layer_index(n, height)
}

pub fn calc_layer_element_count(n: usize, layer: usize) -> usize {
    n.pow(layer as u32)
}

pub fn get_child_element_idx(n: usize, parent_idx: usize, child_num: usize) -> usize {
    assert!(
        child_num < n,
        "child number {} out of range for branching factor {}",
        child_num,
        n
    );
    parent_idx * n + 1 + child_num
}

/// Inverse of `get_child_element_idx`. The root has no parent.
pub fn get_parent_idx_and_child_num(n: usize, child_idx: usize) -> (usize, usize) {
    assert!(child_idx > 0, "the root element has no parent");
    ((child_idx - 1) / n, (child_idx - 1) % n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_layer_index() {
        assert_eq!(calc_first_layer_index(4, 0), 0);
        assert_eq!(calc_first_layer_index(4, 1), 1);
        assert_eq!(calc_first_layer_index(4, 2), 5);
        assert_eq!(calc_first_layer_index(4, 3), 21);
        assert_eq!(calc_total_elements(4, 3), 21);
    }

    #[test]
    fn test_layer_sizes() {
        for n in 1..6 {
            assert_eq!(calc_total_elements(n, 1), 1);
            for h in 1..5 {
                assert_eq!(
                    calc_total_elements(n, h + 1) - calc_total_elements(n, h),
                    calc_layer_element_count(n, h)
                );
            }
        }
    }

    #[test]
    fn test_child_parent_round_trip() {
        for n in 1..7 {
            for parent in 0..50 {
                for child in 0..n {
                    let idx = get_child_element_idx(n, parent, child);
                    assert_eq!(get_parent_idx_and_child_num(n, idx), (parent, child));
                }
            }
        }
    }

    #[test]
    fn test_children_follow_their_layer() {
        let n = 3;
        // first child of the first element of layer 1 is the first element of layer 2
        assert_eq!(
            get_child_element_idx(n, calc_first_layer_index(n, 1), 0),
            calc_first_layer_index(n, 2)
        );
    }

    #[test]
    #[should_panic]
    fn test_child_out_of_range_panics() {
        get_child_element_idx(2, 0, 2);
    }
}
