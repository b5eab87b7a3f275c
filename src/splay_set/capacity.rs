use super::SplaySet;
use crate::raw::RawSplayTree;

impl<T> SplaySet<T> {
    /// Creates an empty set with capacity for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API;
    /// it exists because the nodes live in a contiguous arena that can be
    /// sized up front.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let set: SplaySet<i32> = SplaySet::with_capacity(16);
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SplaySet {
            tree: RawSplayTree::with_capacity(capacity),
        }
    }

    /// Returns the current capacity of the set's node arena.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let set: SplaySet<i32> = SplaySet::with_capacity(32);
    /// assert!(set.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
