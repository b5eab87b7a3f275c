use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::{self, Write as _};

use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Side, SplayNode};
use super::size::Size;

/// The size-augmented splay tree backing `SplaySet`.
///
/// Three layers cooperate over one node arena: rotations (single-step
/// restructuring that preserves in-order sequence and repairs the size
/// augmentation of exactly the two nodes it touches), the splay loop
/// (repeated rotation moving an accessed node to the root), and the
/// descent routines (search and order-statistic counting). Insert and
/// remove orchestrate all three.
///
/// Every path that touches a node finishes by splaying the deepest node it
/// visited; that discipline is what yields the amortized O(log n) bound.
pub(crate) struct RawSplayTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<SplayNode<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<T> RawSplayTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` elements.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of elements in the tree.
    ///
    /// Derived from the root's size augmentation rather than tracked
    /// separately, so any size-maintenance bug shows up here and not only in
    /// counting queries.
    pub(crate) fn len(&self) -> usize {
        self.root.map_or(0, |root| self.nodes.get(root).size().to_usize())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Removes every element.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the element stored at `handle`.
    #[inline]
    pub(crate) fn element(&self, handle: Handle) -> &T {
        self.nodes.get(handle).element()
    }

    /// Returns the handle of the smallest element, if any.
    pub(crate) fn first_in_order(&self) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(left) = self.nodes.get(current).left() {
            current = left;
        }
        Some(current)
    }

    /// Returns the handle of the largest element, if any.
    pub(crate) fn last_in_order(&self) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(right) = self.nodes.get(current).right() {
            current = right;
        }
        Some(current)
    }

    /// Returns the handle of the in-order successor of `handle`, if any.
    ///
    /// Walks the parent back-references; no allocation, no splaying.
    pub(crate) fn next_in_order(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right() {
            let mut current = right;
            while let Some(left) = self.nodes.get(current).left() {
                current = left;
            }
            return Some(current);
        }

        // No right subtree: the successor is the nearest ancestor reached
        // from a left child.
        let mut current = handle;
        loop {
            let parent = self.nodes.get(current).parent()?;
            if self.nodes.get(parent).left() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
    }

    /// Returns the handle of the in-order predecessor of `handle`, if any.
    pub(crate) fn prev_in_order(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.nodes.get(handle).left() {
            let mut current = left;
            while let Some(right) = self.nodes.get(current).right() {
                current = right;
            }
            return Some(current);
        }

        let mut current = handle;
        loop {
            let parent = self.nodes.get(current).parent()?;
            if self.nodes.get(parent).right() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
    }

    /// Empties the tree, returning the elements in ascending order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut handles = Vec::with_capacity(self.len());
        let mut cursor = self.first_in_order();
        while let Some(handle) = cursor {
            cursor = self.next_in_order(handle);
            handles.push(handle);
        }

        self.root = None;
        handles.into_iter().map(|handle| self.nodes.take(handle).into_element()).collect()
    }

    /// Size of an optional subtree; an absent child contributes zero.
    #[inline]
    fn subtree_size(&self, subtree: Option<Handle>) -> usize {
        subtree.map_or(0, |handle| self.nodes.get(handle).size().to_usize())
    }

    /// Recomputes `handle`'s size from its current children.
    fn refresh_size(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = 1 + self.subtree_size(node.left()) + self.subtree_size(node.right());
        self.nodes.get_mut(handle).set_size(Size::from_usize(size));
    }

    /// Which child slot of `parent` holds `child`.
    fn side_of(&self, parent: Handle, child: Handle) -> Side {
        if self.nodes.get(parent).left() == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Rotates `node` toward `direction`, promoting the child on the
    /// opposite side into `node`'s position.
    ///
    /// In-order sequence is unchanged. The sizes of exactly the two nodes
    /// whose children changed are recomputed bottom-up; no other node's
    /// augmentation is affected, and the subtree's total size is preserved.
    fn rotate(&mut self, node: Handle, direction: Side) {
        let promoted = self
            .nodes
            .get(node)
            .child(direction.opposite())
            .expect("`RawSplayTree::rotate()` - node is missing the child to promote!");
        let parent = self.nodes.get(node).parent();

        // The promoted child's subtree on `direction`'s side transfers to
        // `node`, keeping the in-order sequence intact.
        let transfer = self.nodes.get(promoted).child(direction);
        self.nodes.get_mut(node).set_child(direction.opposite(), transfer);
        if let Some(child) = transfer {
            self.nodes.get_mut(child).set_parent(Some(node));
        }

        self.nodes.get_mut(promoted).set_child(direction, Some(node));
        self.nodes.get_mut(node).set_parent(Some(promoted));
        self.nodes.get_mut(promoted).set_parent(parent);

        // The external link above the rotated pair now points at `promoted`.
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, node);
                self.nodes.get_mut(parent).set_child(side, Some(promoted));
            }
            None => self.root = Some(promoted),
        }

        // Bottom-up: `node` is now a child of `promoted`.
        self.refresh_size(node);
        self.refresh_size(promoted);
    }

    /// Rotates left: `node`'s right child takes its place.
    ///
    /// Panics if `node` has no right child; that is a caller bug, not a
    /// runtime condition.
    pub(crate) fn rotate_left(&mut self, node: Handle) {
        self.rotate(node, Side::Left);
    }

    /// Rotates right: `node`'s left child takes its place.
    pub(crate) fn rotate_right(&mut self, node: Handle) {
        self.rotate(node, Side::Right);
    }

    /// Moves `node` to the root by repeated rotation.
    ///
    /// Classic case analysis per step: zig when the parent is the root,
    /// zig-zig (rotate the grandparent first, then the parent) when `node`
    /// and its parent hang from the same side, zig-zag (rotate `node`'s
    /// level first, then the grandparent's) otherwise. A node that is
    /// already the root is left alone.
    pub(crate) fn splay(&mut self, node: Handle) {
        while let Some(parent) = self.nodes.get(node).parent() {
            let node_side = self.side_of(parent, node);
            match self.nodes.get(parent).parent() {
                None => {
                    // Zig.
                    self.rotate(parent, node_side.opposite());
                }
                Some(grandparent) => {
                    let parent_side = self.side_of(grandparent, parent);
                    if node_side == parent_side {
                        // Zig-zig: same direction twice, grandparent first.
                        self.rotate(grandparent, parent_side.opposite());
                        self.rotate(parent, node_side.opposite());
                    } else {
                        // Zig-zag: opposite directions, node's level first.
                        self.rotate(parent, node_side.opposite());
                        self.rotate(grandparent, parent_side.opposite());
                    }
                }
            }
        }
    }

    /// Adds one to the size of every node from `from` up to the root.
    fn grow_to_root(&mut self, from: Handle) {
        let mut cursor = Some(from);
        while let Some(handle) = cursor {
            let node = self.nodes.get_mut(handle);
            node.set_size(Size::from_usize(node.size().to_usize() + 1));
            cursor = node.parent();
        }
    }

    /// Subtracts one from the size of every node from `from` up to the root.
    fn shrink_to_root(&mut self, from: Handle) {
        let mut cursor = Some(from);
        while let Some(handle) = cursor {
            let node = self.nodes.get_mut(handle);
            node.set_size(Size::from_usize(node.size().to_usize() - 1));
            cursor = node.parent();
        }
    }
}

impl<T: Ord> RawSplayTree<T> {
    /// Descends from the root toward `value` and returns the last node
    /// visited: the node holding `value` if present, otherwise the node a
    /// new `value` would hang from. `None` only on an empty tree.
    ///
    /// Never mutates. Splaying the returned node is the caller's job, and
    /// every public caller does so - that is what pays for the amortized
    /// bound.
    fn descend<Q>(&self, value: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            let next = match node.element().borrow().cmp(value) {
                Ordering::Equal => return Some(current),
                Ordering::Less => node.right(),
                Ordering::Greater => node.left(),
            };
            match next {
                Some(child) => current = child,
                None => return Some(current),
            }
        }
    }

    /// Returns a reference to the stored element equal to `value`, splaying
    /// the deepest node visited (the element itself when found).
    pub(crate) fn get<Q>(&mut self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let last = self.descend(value)?;
        self.splay(last);

        let element = self.nodes.get(last).element();
        if element.borrow() == value { Some(element) } else { None }
    }

    pub(crate) fn contains<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get(value).is_some()
    }

    /// Inserts `element`, returning whether it was newly added.
    ///
    /// A duplicate is not stored, but the matching node is still splayed;
    /// the access pays into the amortization either way. On success the new
    /// node ends up at the root, and every subtree along the insertion path
    /// grows by exactly one before the splay reshapes it.
    pub(crate) fn insert(&mut self, element: T) -> bool {
        let Some(location) = self.descend(&element) else {
            let handle = self.nodes.alloc(SplayNode::new(element));
            self.root = Some(handle);
            return true;
        };

        let side = match self.nodes.get(location).element().cmp(&element) {
            Ordering::Equal => {
                self.splay(location);
                return false;
            }
            Ordering::Less => Side::Right,
            Ordering::Greater => Side::Left,
        };

        // The arena's capacity check runs before any linkage changes, so a
        // failed allocation leaves the tree in its previous state.
        let handle = self.nodes.alloc(SplayNode::new(element));
        self.nodes.get_mut(handle).set_parent(Some(location));
        self.nodes.get_mut(location).set_child(side, Some(handle));
        self.grow_to_root(location);
        self.splay(handle);
        true
    }

    /// Removes the element equal to `value` and returns it.
    ///
    /// Returns `None` if absent; the deepest node visited is splayed in
    /// either case. A node with two children first swaps contents with its
    /// in-order predecessor (the rightmost node of its left subtree, which
    /// has at most one child by construction), so the node actually spliced
    /// out never has more than one child.
    pub(crate) fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let last = self.descend(value)?;
        if self.nodes.get(last).element().borrow() != value {
            self.splay(last);
            return None;
        }

        let mut target = last;
        let node = self.nodes.get(target);
        if node.left().is_some() && node.right().is_some() {
            let mut predecessor = node.left().expect("`RawSplayTree::remove()` - left child vanished!");
            while let Some(right) = self.nodes.get(predecessor).right() {
                predecessor = right;
            }
            let (doomed, survivor) = self.nodes.get2_mut(target, predecessor);
            core::mem::swap(doomed.element_mut(), survivor.element_mut());
            target = predecessor;
        }

        // Splice `target` out: its lone child (or nothing) takes its place.
        let node = self.nodes.get(target);
        let parent = node.parent();
        let child = node.left().or(node.right());
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, target);
                self.nodes.get_mut(parent).set_child(side, child);
            }
            None => self.root = child,
        }
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(parent);
        }

        if let Some(parent) = parent {
            self.shrink_to_root(parent);
        }
        let removed = self.nodes.take(target).into_element();
        if let Some(parent) = parent {
            self.splay(parent);
        }
        Some(removed)
    }

    /// Counts stored elements strictly less than `value`, or less than or
    /// equal when `inclusive`.
    ///
    /// The descent mirrors `descend`, accumulating an order statistic:
    /// whenever it steps into a right subtree from a node below `value`,
    /// that node and its entire left subtree are below `value` too, so the
    /// size augmentation answers for them in O(1). The deepest node visited
    /// is splayed; set membership never changes.
    pub(crate) fn count_less_than<Q>(&mut self, value: &Q, inclusive: bool) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(root) = self.root else {
            return 0;
        };

        let mut current = root;
        let mut count = 0;
        loop {
            let node = self.nodes.get(current);
            match node.element().borrow().cmp(value) {
                Ordering::Less => {
                    count += 1 + self.subtree_size(node.left());
                    match node.right() {
                        Some(right) => current = right,
                        None => break,
                    }
                }
                Ordering::Greater => match node.left() {
                    Some(left) => current = left,
                    None => break,
                },
                Ordering::Equal => {
                    // The match's left subtree is strictly below `value` and
                    // was never crossed by a right-move; the match itself
                    // counts only when the bound is inclusive.
                    count += self.subtree_size(node.left());
                    if inclusive {
                        count += 1;
                    }
                    break;
                }
            }
        }

        self.splay(current);
        count
    }

    /// Counts stored elements in the inclusive range `[low, high]`.
    ///
    /// Two counting descents, each followed by its own splay; nothing is
    /// shared between them beyond the tree itself.
    ///
    /// Panics if `low > high`.
    pub(crate) fn range_count<Q>(&mut self, low: &Q, high: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        assert!(low <= high, "`RawSplayTree::range_count()` - `low` > `high`!");
        let through_high = self.count_less_than(high, true);
        let below_low = self.count_less_than(low, false);
        through_high - below_low
    }
}

impl<T: fmt::Debug> RawSplayTree<T> {
    /// Writes an indented `(element size=n)` rendering of the tree shape.
    ///
    /// Diagnostic output with no stability contract. Uses an explicit
    /// `(depth, node)` stack: a self-adjusting tree can degenerate into a
    /// long path, which would overflow a recursive formatter.
    pub(crate) fn dump(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let mut stack: Vec<(usize, Option<Handle>)> = alloc::vec![(0, self.root)];
        while let Some((depth, slot)) = stack.pop() {
            for _ in 0..depth {
                out.write_str("  ")?;
            }
            match slot {
                None => out.write_str("()\n")?,
                Some(handle) => {
                    let node = self.nodes.get(handle);
                    writeln!(out, "({:?} size={})", node.element(), node.size().to_usize())?;
                    stack.push((depth + 1, node.right()));
                    stack.push((depth + 1, node.left()));
                }
            }
        }
        Ok(())
    }
}

impl<T: Clone> Clone for RawSplayTree<T> {
    fn clone(&self) -> Self {
        // Handles are plain indices, so cloning the arena slot-for-slot
        // keeps every link in the copy valid.
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::string::String;
    use std::vec::Vec;

    impl<T: Ord + fmt::Debug> RawSplayTree<T> {
        /// Checks every structural invariant: strict search-tree order,
        /// size augmentation, parent-child link consistency, and agreement
        /// between the derived length and the arena's live-node count.
        /// Panics with a descriptive message on any violation.
        pub(crate) fn validate_invariants(&self) {
            let Some(root) = self.root else {
                assert_eq!(self.nodes.len(), 0, "empty tree must not own nodes");
                return;
            };

            assert!(self.nodes.get(root).parent().is_none(), "root must have no parent");
            let counted = self.validate_subtree(root, None, None);
            assert_eq!(counted, self.len(), "root size disagrees with reachable node count");
            assert_eq!(counted, self.nodes.len(), "arena holds nodes unreachable from the root");
        }

        /// Returns the number of nodes in the subtree, checking order
        /// bounds, parent links, and the size augmentation on the way.
        fn validate_subtree(&self, handle: Handle, low: Option<&T>, high: Option<&T>) -> usize {
            let node = self.nodes.get(handle);
            if let Some(low) = low {
                assert!(node.element() > low, "BST order violated at {:?}: not above {:?}", node.element(), low);
            }
            if let Some(high) = high {
                assert!(node.element() < high, "BST order violated at {:?}: not below {:?}", node.element(), high);
            }

            let mut total = 1;
            if let Some(left) = node.left() {
                assert_eq!(
                    self.nodes.get(left).parent(),
                    Some(handle),
                    "left child of {:?} has a stale parent link",
                    node.element()
                );
                total += self.validate_subtree(left, low, Some(node.element()));
            }
            if let Some(right) = node.right() {
                assert_eq!(
                    self.nodes.get(right).parent(),
                    Some(handle),
                    "right child of {:?} has a stale parent link",
                    node.element()
                );
                total += self.validate_subtree(right, Some(node.element()), high);
            }

            assert_eq!(
                node.size().to_usize(),
                total,
                "size augmentation out of date at {:?}",
                node.element()
            );
            total
        }

        fn in_order_elements(&self) -> Vec<T>
        where
            T: Clone,
        {
            let mut elements = Vec::with_capacity(self.len());
            let mut cursor = self.first_in_order();
            while let Some(handle) = cursor {
                elements.push(self.element(handle).clone());
                cursor = self.next_in_order(handle);
            }
            elements
        }

        fn root_element(&self) -> Option<&T> {
            self.root.map(|root| self.element(root))
        }
    }

    fn tree_of(elements: &[i32]) -> RawSplayTree<i32> {
        let mut tree = RawSplayTree::new();
        for &element in elements {
            tree.insert(element);
        }
        tree
    }

    #[test]
    fn rotations_preserve_order_and_sizes() {
        // 2,1,3 splays into root 3 with a left spine 3-2-1.
        let mut tree = tree_of(&[2, 1, 3]);
        tree.validate_invariants();
        assert_eq!(tree.root_element(), Some(&3));

        let root = tree.root.unwrap();
        tree.rotate_right(root);
        tree.validate_invariants();
        assert_eq!(tree.root_element(), Some(&2));
        assert_eq!(tree.in_order_elements(), [1, 2, 3]);

        let root = tree.root.unwrap();
        tree.rotate_left(root);
        tree.validate_invariants();
        assert_eq!(tree.root_element(), Some(&3));
        assert_eq!(tree.in_order_elements(), [1, 2, 3]);
    }

    #[test]
    fn rotation_below_the_root_keeps_the_external_link() {
        let mut tree = tree_of(&[5, 3, 8, 2, 4, 7, 9, 1]);
        tree.validate_invariants();

        // Rotate some non-root node with a left child; the subtree's
        // position under its parent must be preserved.
        let root = tree.root.unwrap();
        let victim = tree
            .nodes
            .get(root)
            .right()
            .expect("test shape should give the root a right child");
        if tree.nodes.get(victim).left().is_some() {
            tree.rotate_right(victim);
        } else {
            tree.rotate_left(victim);
        }
        tree.validate_invariants();
        assert_eq!(tree.in_order_elements(), [1, 2, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    #[should_panic(expected = "`RawSplayTree::rotate()` - node is missing the child to promote!")]
    fn rotate_without_required_child() {
        let mut tree = tree_of(&[1]);
        let root = tree.root.unwrap();
        tree.rotate_left(root);
    }

    #[test]
    fn insert_splays_new_element_to_root() {
        let mut tree = RawSplayTree::new();
        for element in [5, 1, 9, 3, 7] {
            assert!(tree.insert(element));
            assert_eq!(tree.root_element(), Some(&element));
            tree.validate_invariants();
        }
    }

    #[test]
    fn duplicate_insert_splays_existing_node() {
        let mut tree = tree_of(&[5, 1, 9]);
        assert!(!tree.insert(1));
        assert_eq!(tree.root_element(), Some(&1));
        assert_eq!(tree.len(), 3);
        tree.validate_invariants();
    }

    #[test]
    fn get_splays_found_element() {
        let mut tree = tree_of(&[10, 20, 30, 40]);
        assert_eq!(tree.get(&20), Some(&20));
        assert_eq!(tree.root_element(), Some(&20));
        tree.validate_invariants();
    }

    #[test]
    fn get_splays_last_visited_on_miss() {
        let mut tree = tree_of(&[10, 20, 30]);
        assert_eq!(tree.get(&25), None);
        // The descent for 25 can only have stopped at one of its neighbors.
        let root = *tree.root_element().unwrap();
        assert!(root == 20 || root == 30, "unexpected root {root} after missed lookup");
        tree.validate_invariants();
    }

    #[test]
    fn remove_root_with_single_child() {
        let mut tree = tree_of(&[2, 1]);
        // Root is 1 with 2 as its right child.
        assert_eq!(tree.root_element(), Some(&1));
        assert_eq!(tree.remove(&1), Some(1));
        tree.validate_invariants();
        assert_eq!(tree.root_element(), Some(&2));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_node_with_two_children_uses_predecessor() {
        let mut tree = tree_of(&[50, 25, 75, 10, 30, 60, 90, 27, 40]);
        tree.validate_invariants();

        // Force 25 into an interior position with two children, then
        // remove an element that has both subtrees populated.
        assert!(tree.contains(&50));
        assert_eq!(tree.remove(&50), Some(50));
        tree.validate_invariants();
        assert_eq!(tree.in_order_elements(), [10, 25, 27, 30, 40, 60, 75, 90]);
    }

    #[test]
    fn remove_miss_splays_and_returns_none() {
        let mut tree = tree_of(&[10, 20, 30]);
        assert_eq!(tree.remove(&15), None);
        assert_eq!(tree.len(), 3);
        let root = *tree.root_element().unwrap();
        assert!(root == 10 || root == 20, "unexpected root {root} after missed remove");
        tree.validate_invariants();
    }

    #[test]
    fn count_less_than_both_inclusivities() {
        let mut tree = tree_of(&[1, 3, 5, 8, 10, 12]);

        assert_eq!(tree.count_less_than(&5, false), 2);
        tree.validate_invariants();
        assert_eq!(tree.count_less_than(&5, true), 3);
        assert_eq!(tree.count_less_than(&0, false), 0);
        assert_eq!(tree.count_less_than(&99, true), 6);
        // Absent probe: the descent ends on a missing child, nothing extra
        // is added.
        assert_eq!(tree.count_less_than(&7, true), 3);
        tree.validate_invariants();
    }

    #[test]
    fn strict_count_sees_left_subtree_of_match() {
        // Splay the probed element to the root so its smaller elements all
        // hang in its left subtree; the strict count must still find them.
        let mut tree = tree_of(&[1416, 540]);
        assert!(tree.contains(&1416));
        assert_eq!(tree.root_element(), Some(&1416));

        assert_eq!(tree.count_less_than(&1416, false), 1);
        assert_eq!(tree.count_less_than(&1416, true), 2);
        tree.validate_invariants();
    }

    #[test]
    #[should_panic(expected = "`RawSplayTree::range_count()` - `low` > `high`!")]
    fn range_count_inverted_bounds() {
        let mut tree = tree_of(&[1, 2, 3]);
        let _ = tree.range_count(&5, &3);
    }

    #[test]
    fn dump_renders_every_node_with_its_size() {
        let tree = tree_of(&[2, 1, 3]);
        let mut rendered = String::new();
        tree.dump(&mut rendered).unwrap();
        assert!(rendered.contains("size=3"));
        assert!(rendered.contains("(1 size=1)"));
        assert!(rendered.contains("()"));
    }

    // Property tests drive random operation sequences against a BTreeSet
    // model and re-validate every invariant after each step.

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
        Contains(i32),
        CountThrough(i32),
        RangeCount(i32, i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let value = 0i32..200;
        prop_oneof![
            4 => value.clone().prop_map(Op::Insert),
            2 => value.clone().prop_map(Op::Remove),
            1 => value.clone().prop_map(Op::Contains),
            1 => value.clone().prop_map(Op::CountThrough),
            1 => (value.clone(), value).prop_map(|(a, b)| Op::RangeCount(a.min(b), a.max(b))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn tree_matches_model_and_stays_valid(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut tree: RawSplayTree<i32> = RawSplayTree::new();
            let mut model: BTreeSet<i32> = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(value) => {
                        prop_assert_eq!(tree.insert(value), model.insert(value), "insert({})", value);
                    }
                    Op::Remove(value) => {
                        prop_assert_eq!(tree.remove(&value), model.take(&value), "remove({})", value);
                    }
                    Op::Contains(value) => {
                        prop_assert_eq!(tree.contains(&value), model.contains(&value), "contains({})", value);
                    }
                    Op::CountThrough(value) => {
                        let expected = model.range(..=value).count();
                        prop_assert_eq!(tree.count_less_than(&value, true), expected, "count through {}", value);
                        let expected = model.range(..value).count();
                        prop_assert_eq!(tree.count_less_than(&value, false), expected, "count below {}", value);
                    }
                    Op::RangeCount(low, high) => {
                        let expected = model.range(low..=high).count();
                        prop_assert_eq!(tree.range_count(&low, &high), expected, "range_count({}, {})", low, high);
                    }
                }

                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }

            let elements: Vec<i32> = model.iter().copied().collect();
            prop_assert_eq!(tree.in_order_elements(), elements);
        }

        #[test]
        fn insert_all_then_remove_all_round_trip(values in prop::collection::btree_set(any::<i32>(), 0..200)) {
            let mut tree: RawSplayTree<i32> = RawSplayTree::new();
            for &value in &values {
                prop_assert!(tree.insert(value));
            }
            tree.validate_invariants();
            prop_assert_eq!(tree.len(), values.len());

            for &value in &values {
                prop_assert_eq!(tree.remove(&value), Some(value));
                tree.validate_invariants();
            }
            prop_assert!(tree.is_empty());
        }

        #[test]
        fn drain_yields_sorted_unique_elements(values in prop::collection::vec(0i32..500, 0..300)) {
            let mut tree: RawSplayTree<i32> = RawSplayTree::new();
            let mut model: BTreeSet<i32> = BTreeSet::new();
            for &value in &values {
                tree.insert(value);
                model.insert(value);
            }

            let drained = tree.drain_to_vec();
            let expected: Vec<i32> = model.into_iter().collect();
            prop_assert_eq!(drained, expected);
            prop_assert!(tree.is_empty());
            tree.validate_invariants();
        }

        #[test]
        fn clone_is_independent(values in prop::collection::vec(0i32..100, 0..100)) {
            let mut tree: RawSplayTree<i32> = RawSplayTree::new();
            for &value in &values {
                tree.insert(value);
            }

            let mut copy = tree.clone();
            copy.validate_invariants();
            prop_assert_eq!(copy.in_order_elements(), tree.in_order_elements());

            // Mutating the copy must not disturb the original.
            copy.insert(i32::MAX);
            copy.validate_invariants();
            tree.validate_invariants();
            prop_assert_eq!(tree.contains(&i32::MAX), false);
        }
    }
}
