use core::borrow::Borrow;

use super::SplaySet;

impl<T: Ord> SplaySet<T> {
    /// Returns the number of elements strictly less than `value`.
    ///
    /// `value` itself need not be in the set. The query is answered in a
    /// single root-to-leaf descent using the subtree sizes, not by
    /// iterating; the deepest node visited is splayed afterwards, which is
    /// why this takes `&mut self`.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::from([1, 3, 5, 8, 10, 12]);
    ///
    /// assert_eq!(set.count_less_than(&5), 2);
    /// assert_eq!(set.count_less_than(&6), 3);
    /// assert_eq!(set.count_less_than(&0), 0);
    /// assert_eq!(set.count_less_than(&100), 6);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    #[must_use]
    pub fn count_less_than<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.count_less_than(value, false)
    }

    /// Returns the number of elements less than or equal to `value`.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::from([1, 3, 5, 8, 10, 12]);
    ///
    /// assert_eq!(set.count_less_or_equal(&5), 3);
    /// assert_eq!(set.count_less_or_equal(&4), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    #[must_use]
    pub fn count_less_or_equal<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.count_less_than(value, true)
    }

    /// Returns the number of elements in the inclusive range `[low, high]`.
    ///
    /// Neither bound needs to be in the set. Computed as two counting
    /// descents (`count_less_or_equal(high) - count_less_than(low)`), each
    /// of which splays the deepest node it visits.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// # Panics
    ///
    /// Panics if `low > high`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::from([1, 4, 8, 10, 12]);
    ///
    /// assert_eq!(set.range_count(&2, &10), 3);
    /// assert_eq!(set.range_count(&4, &4), 1);
    /// assert_eq!(set.range_count(&5, &7), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    #[must_use]
    pub fn range_count<Q>(&mut self, low: &Q, high: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.range_count(low, high)
    }
}
