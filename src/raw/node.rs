use super::handle::Handle;
use super::size::Size;

/// Names one of a node's two child slots.
///
/// Rotation, descent, and splaying are all left/right symmetric; threading a
/// `Side` through them keeps each algorithm written once instead of as a
/// mirrored pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single node of the splay tree.
///
/// Children are owned by the arena and referenced by handle; `parent` is the
/// non-owning back-reference used for bottom-up restructuring during splays.
/// `size` counts the nodes in the subtree rooted here, including this node,
/// and must equal `1 + size(left) + size(right)` between operations.
#[derive(Clone)]
pub(crate) struct SplayNode<T> {
    element: T,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    size: Size,
}

impl<T> SplayNode<T> {
    /// Creates a detached leaf holding `element`.
    pub(crate) const fn new(element: T) -> Self {
        Self {
            element,
            parent: None,
            left: None,
            right: None,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) fn element(&self) -> &T {
        &self.element
    }

    #[inline]
    pub(crate) fn element_mut(&mut self) -> &mut T {
        &mut self.element
    }

    pub(crate) fn into_element(self) -> T {
        self.element
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Returns the child hanging from the given side.
    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    /// Returns the size of the subtree rooted at this node.
    #[inline]
    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn sides_are_opposites() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.opposite().opposite(), Side::Left);
    }

    #[test]
    fn new_node_is_detached() {
        let node = SplayNode::new(42);
        assert_eq!(*node.element(), 42);
        assert!(node.parent().is_none());
        assert!(node.left().is_none());
        assert!(node.right().is_none());
        assert_eq!(node.size().to_usize(), 1);
    }

    #[test]
    fn child_slots_are_independent() {
        let mut node = SplayNode::new(0);
        let left = Handle::from_index(1);
        let right = Handle::from_index(2);

        node.set_child(Side::Left, Some(left));
        node.set_child(Side::Right, Some(right));
        assert_eq!(node.child(Side::Left), Some(left));
        assert_eq!(node.child(Side::Right), Some(right));

        node.set_child(Side::Left, None);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), Some(right));
    }
}
