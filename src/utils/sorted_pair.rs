use std::cmp::PartialOrd;

/// A pair of elements stored in increasing order.
///
/// Pairs built from the same two elements in either order compare and hash
/// identically, which makes this usable as an undirected edge key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(a: T, b: T) -> Self {
        if a > b {
            SortedPair([b, a])
        } else {
            SortedPair([a, b])
        }
    }
}
