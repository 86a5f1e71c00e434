//! Insertion-ordered, string-keyed container.

use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::container::{creates_cycle, Container};
use crate::node::{sealed, Node, ObjectSlot, ParentLink, Slot, TreeNode};

/// A JSON object: unique string keys in insertion order.
///
/// Overwriting a key keeps its original position. Child lookups by node
/// (`includes`, `delete_child`, `replace_child`) compare identity, not keys.
#[derive(Clone)]
pub struct ObjectNode {
    slot: Rc<ObjectSlot>,
}

impl ObjectNode {
    pub fn new() -> Self {
        Self {
            slot: Slot::new(IndexMap::new()),
        }
    }

    pub(crate) fn from_slot(slot: Rc<ObjectSlot>) -> Self {
        Self { slot }
    }

    pub(crate) fn downgrade(&self) -> Weak<ObjectSlot> {
        Rc::downgrade(&self.slot)
    }

    fn container(&self) -> Container {
        Container::Object(self.clone())
    }

    fn position(&self, addr: *const ()) -> Option<usize> {
        self.slot
            .data
            .borrow()
            .values()
            .position(|child| child.addr() == addr)
    }

    pub fn len(&self) -> usize {
        self.slot.data.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live `(key, child)` pairs in insertion order.
    pub fn entries(&self) -> ObjectEntries {
        ObjectEntries {
            object: self.clone(),
            cursor: 0,
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.slot.data.borrow().keys().cloned().collect()
    }

    /// Removes every child.
    ///
    /// The removed children keep pointing at this object as their parent.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.slot.data.borrow_mut());
        trace!(removed = removed.len(), "object cleared");
    }

    pub fn get(&self, key: &str) -> Option<Node> {
        self.slot.data.borrow().get(key).cloned()
    }

    pub fn has(&self, key: &str) -> bool {
        self.slot.data.borrow().contains_key(key)
    }

    pub fn includes(&self, node: &(impl TreeNode + ?Sized)) -> bool {
        self.position(node.addr()).is_some()
    }

    /// Removes `child` wherever it is stored and clears its parent link;
    /// no-op when `child` is not in this object.
    pub fn delete_child(&self, child: &(impl TreeNode + ?Sized)) -> &Self {
        let removed = match self.position(child.addr()) {
            Some(index) => self.slot.data.borrow_mut().shift_remove_index(index),
            None => None,
        };
        if let Some((key, removed)) = removed {
            removed.link().clear();
            trace!(%key, "object child detached");
        }
        self
    }

    /// Removes the child stored under `key` and returns it detached.
    pub fn remove(&self, key: &str) -> Option<Node> {
        let removed = self.slot.data.borrow_mut().shift_remove(key)?;
        removed.link().clear();
        trace!(%key, "object child detached");
        Some(removed)
    }

    /// Puts `node` under the key `child` is stored at; no-op when `child` is
    /// not in this object.
    ///
    /// `node` is first detached from wherever it is, this object included.
    pub fn replace_child(&self, child: &(impl TreeNode + ?Sized), node: impl Into<Node>) -> &Self {
        let node = node.into();
        if !self.includes(child) || child.ptr_eq(&node) {
            return self;
        }
        let container = self.container();
        if creates_cycle(&container, &node) {
            warn!(kind = %node.kind(), "refusing to replace object child with an ancestor");
            return self;
        }
        child.link().clear();
        node.set_parent(Some(&container));
        let Some(index) = self.position(child.addr()) else {
            return self;
        };
        let displaced = {
            let mut children = self.slot.data.borrow_mut();
            children
                .get_index_mut(index)
                .map(|(key, slot)| (key.clone(), std::mem::replace(slot, node)))
        };
        if let Some((key, _)) = displaced {
            trace!(%key, "object child replaced");
        }
        self
    }

    /// Stores `node` under `key`, orphaning the previous occupant.
    ///
    /// An existing key keeps its position; a new key is appended. `node` is
    /// detached from its previous parent first.
    pub fn set(&self, key: impl Into<String>, node: impl Into<Node>) -> &Self {
        let key = key.into();
        let node = node.into();
        if self.get(&key).is_some_and(|current| current.ptr_eq(&node)) {
            return self;
        }
        let container = self.container();
        if creates_cycle(&container, &node) {
            warn!(%key, kind = %node.kind(), "refusing to nest an object inside itself");
            return self;
        }
        node.set_parent(Some(&container));
        trace!(%key, "object child attached");
        let displaced = self.slot.data.borrow_mut().insert(key, node);
        if let Some(displaced) = displaced {
            displaced.link().clear();
        }
        self
    }
}

impl Default for ObjectNode {
    fn default() -> Self {
        Self::new()
    }
}

impl sealed::Sealed for ObjectNode {}

impl TreeNode for ObjectNode {
    fn link(&self) -> &ParentLink {
        &self.slot.link
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.slot) as *const ()
    }

    fn to_node(&self) -> Node {
        Node::Object(self.clone())
    }
}

impl fmt::Debug for ObjectNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectNode")
            .field(&*self.slot.data.borrow())
            .finish()
    }
}

/// Iterator returned by [`ObjectNode::entries`].
pub struct ObjectEntries {
    object: ObjectNode,
    cursor: usize,
}

impl Iterator for ObjectEntries {
    type Item = (String, Node);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self
            .object
            .slot
            .data
            .borrow()
            .get_index(self.cursor)
            .map(|(key, child)| (key.clone(), child.clone()))?;
        self.cursor += 1;
        Some(entry)
    }
}
