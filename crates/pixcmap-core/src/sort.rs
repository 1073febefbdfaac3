//! Sort permutations
//!
//! # See also
//!
//! C Leptonica: `numaGetSortIndex()` in `numafunc1.c`

use std::cmp::Ordering;

/// Sort direction.
///
/// # See also
///
/// C Leptonica: `L_SORT_INCREASING`, `L_SORT_DECREASING`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Sort in ascending order (smallest first).
    #[default]
    Increasing,
    /// Sort in descending order (largest first).
    Decreasing,
}

/// Return the permutation of indices that sorts `keys` in `order`.
///
/// The sort is stable: equal keys keep their original relative order in
/// both directions. Incomparable keys (NaN) are treated as equal.
///
/// # Examples
///
/// ```
/// use pixcmap_core::sort::{SortOrder, sort_index};
///
/// let idx = sort_index(&[30, 10, 20, 10], SortOrder::Increasing);
/// assert_eq!(idx, vec![1, 3, 2, 0]);
/// ```
pub fn sort_index<T: PartialOrd>(keys: &[T], order: SortOrder) -> Vec<usize> {
    let mut index: Vec<usize> = (0..keys.len()).collect();
    index.sort_by(|&a, &b| {
        let ord = keys[a].partial_cmp(&keys[b]).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Increasing => ord,
            SortOrder::Decreasing => ord.reverse(),
        }
    });
    index
}
