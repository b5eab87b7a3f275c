//! An ordered set with order-statistic queries, backed by a splay tree.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::raw::{Handle, RawSplayTree};

mod capacity;
mod counting;

/// An ordered set based on a self-adjusting (splay) binary search tree,
/// augmented with subtree sizes for order-statistic queries.
///
/// Every operation, including the counting queries, runs in amortized
/// O(log n). Frequently accessed elements migrate toward the root, so
/// workloads with skewed access patterns see better-than-logarithmic
/// behavior on their hot elements.
///
/// # Self-adjustment and `&mut self`
///
/// A splay tree restructures itself on *every* access, lookups included.
/// [`contains`], [`get`], and the counting queries therefore take
/// `&mut self` even though they never change the set's contents: the
/// amortized bound depends on the restructuring, and skipping it on reads
/// would forfeit the guarantee. [`iter`], [`first`], and [`last`] take
/// `&self` and leave the tree shape alone.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering relative to any other element, as determined by the [`Ord`]
/// trait, changes while it is in the set. This is normally only possible
/// through [`Cell`], [`RefCell`], global state, I/O, or unsafe code. The
/// behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `SplaySet` that observed it and not result in
/// undefined behavior.
///
/// [`contains`]: SplaySet::contains
/// [`get`]: SplaySet::get
/// [`iter`]: SplaySet::iter
/// [`first`]: SplaySet::first
/// [`last`]: SplaySet::last
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use splay_ost::SplaySet;
///
/// let mut primes = SplaySet::new();
///
/// primes.insert(2);
/// primes.insert(3);
/// primes.insert(5);
/// primes.insert(7);
///
/// assert!(primes.contains(&5));
/// assert_eq!(primes.count_less_than(&6), 3);
/// assert_eq!(primes.range_count(&3, &7), 3);
///
/// primes.remove(&3);
/// let remaining: Vec<_> = primes.iter().copied().collect();
/// assert_eq!(remaining, [2, 5, 7]);
/// ```
///
/// A `SplaySet` with a known list of elements can be initialized from an
/// array:
///
/// ```
/// use splay_ost::SplaySet;
///
/// let set = SplaySet::from([1, 2, 3]);
/// ```
pub struct SplaySet<T> {
    tree: RawSplayTree<T>,
}

/// An iterator over the elements of a `SplaySet` in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`SplaySet`]. It
/// walks the tree without splaying, so it borrows the set immutably.
///
/// # Examples
///
/// ```
/// use splay_ost::SplaySet;
///
/// let set = SplaySet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// ```
///
/// [`iter`]: SplaySet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    tree: &'a RawSplayTree<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the elements of a `SplaySet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`SplaySet`]
/// (provided by the [`IntoIterator`] trait).
///
/// # Examples
///
/// ```
/// use splay_ost::SplaySet;
///
/// let set = SplaySet::from([1, 2, 3]);
/// let mut iter = set.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next_back(), Some(3));
/// assert_eq!(iter.next(), Some(2));
/// ```
///
/// [`into_iter`]: SplaySet#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> SplaySet<T> {
    /// Makes a new, empty `SplaySet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    ///
    /// // elements can now be inserted into the empty set
    /// set.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> SplaySet<T> {
        SplaySet {
            tree: RawSplayTree::new(),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// assert!(set.is_empty());
    /// set.insert(1);
    /// assert!(!set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::from([1, 2, 3]);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a reference to the smallest element in the set, if any.
    ///
    /// Does not splay; the tree shape is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let set = SplaySet::from([3, 1, 2]);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) worst case (the tree may be a left spine); O(log n) amortized
    /// over a sequence of splaying operations.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first_in_order().map(|handle| self.tree.element(handle))
    }

    /// Returns a reference to the largest element in the set, if any.
    ///
    /// Does not splay; the tree shape is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let set = SplaySet::from([3, 1, 2]);
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last_in_order().map(|handle| self.tree.element(handle))
    }

    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// Iteration walks the tree in place without splaying, so the borrow is
    /// immutable and the tree shape is unchanged afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let set = SplaySet::from([3, 1, 2]);
    /// let elements: Vec<_> = set.iter().copied().collect();
    /// assert_eq!(elements, [1, 2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) for a full traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: &self.tree,
            front: self.tree.first_in_order(),
            back: self.tree.last_in_order(),
            remaining: self.tree.len(),
        }
    }

    /// Writes an indented rendering of the current tree shape, one node per
    /// line with its subtree size.
    ///
    /// Diagnostic output: the format is not stable and the tree shape
    /// depends on the access history, not just the contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let set = SplaySet::from([2, 1, 3]);
    /// let mut rendered = String::new();
    /// set.dump(&mut rendered).unwrap();
    /// assert!(rendered.contains("size=3"));
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying writer.
    pub fn dump<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        T: fmt::Debug,
    {
        self.tree.dump(out)
    }

    /// Adds `element` to the set.
    ///
    /// Returns whether the element was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal element, `true` is
    ///   returned.
    /// - If the set already contained an equal element, `false` is returned,
    ///   and the set is not modified: the original element is not replaced,
    ///   and `element` is dropped.
    ///
    /// The accessed node (new or pre-existing) is splayed to the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    ///
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    pub fn insert(&mut self, element: T) -> bool
    where
        T: Ord,
    {
        self.tree.insert(element)
    }

    /// Removes the element equal to `value` from the set and returns it, if
    /// one was present.
    ///
    /// The element may be any borrowed form of the set's element type, but
    /// the ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// Whether or not the element was present, the deepest node the search
    /// visited is splayed to the root, so even a miss pays into the
    /// amortized bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::from([1, 2, 3]);
    ///
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value)
    }

    /// Removes the element equal to `value` from the set. Returns whether
    /// such an element was present.
    ///
    /// The element may be any borrowed form of the set's element type, but
    /// the ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    ///
    /// set.insert(2);
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.take(value).is_some()
    }

    /// Returns `true` if the set contains an element equal to `value`.
    ///
    /// The element may be any borrowed form of the set's element type, but
    /// the ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// Takes `&mut self`: the lookup splays the accessed node to the root,
    /// which is what makes repeated lookups of hot elements cheap.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::from([1, 2, 3]);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    #[must_use]
    pub fn contains<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.tree.contains(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal
    /// to `value`.
    ///
    /// The element may be any borrowed form of the set's element type, but
    /// the ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// Takes `&mut self` for the same reason as [`contains`](SplaySet::contains).
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let mut set = SplaySet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    #[must_use]
    pub fn get<Q>(&mut self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.tree.get(value)
    }
}

impl<T> Default for SplaySet<T> {
    /// Creates an empty `SplaySet`.
    fn default() -> SplaySet<T> {
        SplaySet::new()
    }
}

impl<T: Clone> Clone for SplaySet<T> {
    fn clone(&self) -> Self {
        SplaySet {
            tree: self.tree.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SplaySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SplaySet<T> {
    fn eq(&self, other: &SplaySet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SplaySet<T> {}

impl<T: PartialOrd> PartialOrd for SplaySet<T> {
    fn partial_cmp(&self, other: &SplaySet<T>) -> Option<core::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for SplaySet<T> {
    fn cmp(&self, other: &SplaySet<T>) -> core::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for SplaySet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for element in self.iter() {
            element.hash(state);
        }
    }
}

impl<T: Ord> FromIterator<T> for SplaySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> SplaySet<T> {
        let mut set = SplaySet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for SplaySet<T> {
    /// Converts a `[T; N]` into a `SplaySet<T>`.
    ///
    /// Duplicates are dropped; the first occurrence wins.
    ///
    /// ```
    /// use splay_ost::SplaySet;
    ///
    /// let set1 = SplaySet::from([1, 2, 3, 4]);
    /// let set2: SplaySet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(elements: [T; N]) -> SplaySet<T> {
        SplaySet::from_iter(elements)
    }
}

impl<T: Ord> Extend<T> for SplaySet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for SplaySet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T> IntoIterator for &'a SplaySet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for SplaySet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator that consumes the set, visiting the elements in
    /// ascending order.
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.tree.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front.take()?;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.back = None;
        } else {
            self.front = self.tree.next_in_order(handle);
        }
        Some(self.tree.element(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back.take()?;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.front = None;
        } else {
            self.back = self.tree.prev_in_order(handle);
        }
        Some(self.tree.element(handle))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
