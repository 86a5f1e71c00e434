//! Index-ordered container.

use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

use crate::container::{creates_cycle, Container};
use crate::node::{sealed, ArraySlot, Node, ParentLink, Slot, TreeNode};

/// A JSON array: a contiguous, 0-based sequence of children.
///
/// Indices shift as children are added and removed. Membership is by node
/// identity, so the same node appears at most once.
#[derive(Clone)]
pub struct ArrayNode {
    slot: Rc<ArraySlot>,
}

impl ArrayNode {
    pub fn new() -> Self {
        Self {
            slot: Slot::new(Vec::new()),
        }
    }

    pub(crate) fn from_slot(slot: Rc<ArraySlot>) -> Self {
        Self { slot }
    }

    pub(crate) fn downgrade(&self) -> Weak<ArraySlot> {
        Rc::downgrade(&self.slot)
    }

    fn container(&self) -> Container {
        Container::Array(self.clone())
    }

    fn position(&self, addr: *const ()) -> Option<usize> {
        self.slot
            .data
            .borrow()
            .iter()
            .position(|child| child.addr() == addr)
    }

    pub fn size(&self) -> usize {
        self.slot.data.borrow().len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Live `(index, child)` pairs in index order.
    ///
    /// Each step reads the array as it is at that moment, so children added
    /// or removed while iterating are observed.
    pub fn entries(&self) -> ArrayEntries {
        ArrayEntries {
            array: self.clone(),
            cursor: 0,
        }
    }

    /// Removes every child.
    ///
    /// The removed children keep pointing at this array as their parent.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.slot.data.borrow_mut());
        trace!(removed = removed.len(), "array cleared");
    }

    pub fn get(&self, index: usize) -> Option<Node> {
        self.slot.data.borrow().get(index).cloned()
    }

    pub fn has(&self, index: usize) -> bool {
        index < self.size()
    }

    pub fn includes(&self, node: &(impl TreeNode + ?Sized)) -> bool {
        self.position(node.addr()).is_some()
    }

    /// Removes `child` and clears its parent link; no-op when `child` is not
    /// in this array.
    pub fn delete_child(&self, child: &(impl TreeNode + ?Sized)) -> &Self {
        let removed = {
            let mut children = self.slot.data.borrow_mut();
            children
                .iter()
                .position(|c| c.addr() == child.addr())
                .map(|index| (index, children.remove(index)))
        };
        if let Some((index, removed)) = removed {
            removed.link().clear();
            trace!(index, "array child detached");
        }
        self
    }

    /// Puts `node` where `child` is; no-op when `child` is not in this array.
    ///
    /// `node` is first detached from wherever it is, this array included.
    pub fn replace_child(&self, child: &(impl TreeNode + ?Sized), node: impl Into<Node>) -> &Self {
        let node = node.into();
        if !self.includes(child) || child.ptr_eq(&node) {
            return self;
        }
        let container = self.container();
        if creates_cycle(&container, &node) {
            warn!(kind = %node.kind(), "refusing to replace array child with an ancestor");
            return self;
        }
        child.link().clear();
        node.set_parent(Some(&container));
        let displaced = {
            let mut children = self.slot.data.borrow_mut();
            children
                .iter()
                .position(|c| c.addr() == child.addr())
                .map(|index| (index, std::mem::replace(&mut children[index], node)))
        };
        if let Some((index, _)) = displaced {
            trace!(index, "array child replaced");
        }
        self
    }

    /// Stores `node` at `index`, orphaning the node that occupied `index`
    /// when the call was made.
    ///
    /// The slot is resolved against the array as it is on entry: when `node`
    /// already is an earlier child of this array, it takes the occupant's
    /// place even though removing it shifts the indices. Setting past the end
    /// fills the gap with fresh null nodes, then appends.
    pub fn set(&self, index: usize, node: impl Into<Node>) -> &Self {
        let node = node.into();
        let occupant = self.get(index);
        if occupant.as_ref().is_some_and(|current| current.ptr_eq(&node)) {
            return self;
        }
        let container = self.container();
        if creates_cycle(&container, &node) {
            warn!(index, kind = %node.kind(), "refusing to nest an array inside itself");
            return self;
        }
        let len = self.size();
        node.set_parent(Some(&container));

        if let Some(position) = occupant.and_then(|occupant| self.position(occupant.addr())) {
            let displaced = std::mem::replace(&mut self.slot.data.borrow_mut()[position], node);
            displaced.link().clear();
            trace!(index, position, "array child replaced");
            return self;
        }

        // `node` may have left this array, so the gap is measured from the
        // length on entry.
        let fillers: Vec<Node> = (len..index)
            .map(|_| {
                let filler = Node::null();
                filler.link().set(Some(&container));
                filler
            })
            .collect();
        if !fillers.is_empty() {
            trace!(from = len, to = index, "array gap filled with null");
        }
        let mut children = self.slot.data.borrow_mut();
        children.extend(fillers);
        children.push(node);
        trace!(index = children.len() - 1, "array child attached");
        self
    }

    /// Appends `node` unless it already is in this array; returns the new
    /// size.
    ///
    /// A node held by another container is moved here.
    pub fn push(&self, node: impl Into<Node>) -> usize {
        let node = node.into();
        if self.includes(&node) {
            return self.size();
        }
        let container = self.container();
        if creates_cycle(&container, &node) {
            warn!(kind = %node.kind(), "refusing to nest an array inside itself");
            return self.size();
        }
        node.set_parent(Some(&container));
        self.slot.data.borrow_mut().push(node);
        trace!(index = self.size() - 1, "array child attached");
        self.size()
    }

    /// [`push`](ArrayNode::push) for each node in order; returns the new size.
    pub fn extend<I>(&self, nodes: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        for node in nodes {
            self.push(node);
        }
        self.size()
    }
}

impl Default for ArrayNode {
    fn default() -> Self {
        Self::new()
    }
}

impl sealed::Sealed for ArrayNode {}

impl TreeNode for ArrayNode {
    fn link(&self) -> &ParentLink {
        &self.slot.link
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.slot) as *const ()
    }

    fn to_node(&self) -> Node {
        Node::Array(self.clone())
    }
}

impl fmt::Debug for ArrayNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArrayNode")
            .field(&*self.slot.data.borrow())
            .finish()
    }
}

/// Iterator returned by [`ArrayNode::entries`].
pub struct ArrayEntries {
    array: ArrayNode,
    cursor: usize,
}

impl Iterator for ArrayEntries {
    type Item = (usize, Node);

    fn next(&mut self) -> Option<Self::Item> {
        let child = self.array.get(self.cursor)?;
        let index = self.cursor;
        self.cursor += 1;
        Some((index, child))
    }
}
