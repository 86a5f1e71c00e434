//! The container capability shared by [`ArrayNode`] and [`ObjectNode`].

use std::fmt;

use crate::array::{ArrayEntries, ArrayNode};
use crate::node::{sealed, Key, Node, ParentLink, TreeNode, WeakContainer};
use crate::object::{ObjectEntries, ObjectNode};

/// Either kind of container, addressed by [`Key`].
///
/// Keys of the wrong kind (a name on an array, an index on an object) never
/// match: lookups return `None`/`false` and `set` is a no-op.
#[derive(Clone)]
pub enum Container {
    Array(ArrayNode),
    Object(ObjectNode),
}

impl Container {
    pub(crate) fn downgrade(&self) -> WeakContainer {
        match self {
            Container::Array(array) => WeakContainer::Array(array.downgrade()),
            Container::Object(object) => WeakContainer::Object(object.downgrade()),
        }
    }

    pub fn as_array(&self) -> Option<&ArrayNode> {
        match self {
            Container::Array(array) => Some(array),
            Container::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Container::Array(_) => None,
            Container::Object(object) => Some(object),
        }
    }

    /// Live, ordered `(key, child)` pairs.
    pub fn entries(&self) -> Entries {
        match self {
            Container::Array(array) => Entries::Array(array.entries()),
            Container::Object(object) => Entries::Object(object.entries()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Container::Array(array) => array.len(),
            Container::Object(object) => object.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties the container. Removed children keep their parent link.
    pub fn clear(&self) {
        match self {
            Container::Array(array) => array.clear(),
            Container::Object(object) => object.clear(),
        }
    }

    pub fn delete_child(&self, child: &(impl TreeNode + ?Sized)) -> &Self {
        match self {
            Container::Array(array) => {
                array.delete_child(child);
            }
            Container::Object(object) => {
                object.delete_child(child);
            }
        }
        self
    }

    pub fn replace_child(&self, child: &(impl TreeNode + ?Sized), node: impl Into<Node>) -> &Self {
        match self {
            Container::Array(array) => {
                array.replace_child(child, node);
            }
            Container::Object(object) => {
                object.replace_child(child, node);
            }
        }
        self
    }

    pub fn get(&self, key: impl Into<Key>) -> Option<Node> {
        match (self, key.into()) {
            (Container::Array(array), Key::Index(index)) => array.get(index),
            (Container::Object(object), Key::Name(name)) => object.get(&name),
            _ => None,
        }
    }

    pub fn has(&self, key: impl Into<Key>) -> bool {
        match (self, key.into()) {
            (Container::Array(array), Key::Index(index)) => array.has(index),
            (Container::Object(object), Key::Name(name)) => object.has(&name),
            _ => false,
        }
    }

    pub fn set(&self, key: impl Into<Key>, node: impl Into<Node>) -> &Self {
        match (self, key.into()) {
            (Container::Array(array), Key::Index(index)) => {
                array.set(index, node);
            }
            (Container::Object(object), Key::Name(name)) => {
                object.set(name, node);
            }
            _ => {}
        }
        self
    }

    pub fn includes(&self, node: &(impl TreeNode + ?Sized)) -> bool {
        match self {
            Container::Array(array) => array.includes(node),
            Container::Object(object) => object.includes(node),
        }
    }
}

impl sealed::Sealed for Container {}

impl TreeNode for Container {
    fn link(&self) -> &ParentLink {
        match self {
            Container::Array(array) => array.link(),
            Container::Object(object) => object.link(),
        }
    }

    fn addr(&self) -> *const () {
        match self {
            Container::Array(array) => array.addr(),
            Container::Object(object) => object.addr(),
        }
    }

    fn to_node(&self) -> Node {
        Node::from(self.clone())
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Array(array) => array.fmt(f),
            Container::Object(object) => object.fmt(f),
        }
    }
}

impl From<ArrayNode> for Container {
    fn from(array: ArrayNode) -> Self {
        Container::Array(array)
    }
}

impl From<ObjectNode> for Container {
    fn from(object: ObjectNode) -> Self {
        Container::Object(object)
    }
}

/// Iterator over a [`Container`]'s entries; see [`Container::entries`].
pub enum Entries {
    Array(ArrayEntries),
    Object(ObjectEntries),
}

impl Iterator for Entries {
    type Item = (Key, Node);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Array(entries) => entries.next().map(|(index, child)| (Key::Index(index), child)),
            Entries::Object(entries) => entries.next().map(|(name, child)| (Key::Name(name), child)),
        }
    }
}

/// Returns `true` when attaching `node` under `container` would make a node
/// its own ancestor.
///
/// Only links backed by real membership are followed, so stale links left
/// behind by `clear` do not count as ancestry.
pub(crate) fn creates_cycle(container: &Container, node: &Node) -> bool {
    if node.is_scalar() {
        return false;
    }
    let mut current = container.to_node();
    loop {
        if current.ptr_eq(node) {
            return true;
        }
        match current.parent() {
            Some(parent) if parent.includes(&current) => current = parent.to_node(),
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_key_kind_is_noop() {
        let array = Container::from(ArrayNode::new());
        array.set("a", Node::null());
        assert!(array.is_empty());
        assert!(!array.has("a"));

        let object = Container::from(ObjectNode::new());
        object.set(0usize, Node::null());
        assert!(object.is_empty());
        assert!(object.get(0usize).is_none());
    }

    #[test]
    fn test_entries_yield_keys() {
        let object = ObjectNode::new();
        object.set("x", Node::number(1));
        let keys: Vec<Key> = Container::from(object).entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![Key::from("x")]);
    }

    #[test]
    fn test_cycle_detection() {
        let outer = ArrayNode::new();
        let inner = ObjectNode::new();
        outer.push(&inner);
        let container = Container::from(inner.clone());
        assert!(creates_cycle(&container, &Node::from(&outer)));
        assert!(creates_cycle(&container, &Node::from(&inner)));
        assert!(!creates_cycle(&container, &Node::array()));
        assert!(!creates_cycle(&container, &Node::null()));
    }
}
