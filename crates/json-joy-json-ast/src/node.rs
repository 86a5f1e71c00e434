//! Node identity, parent links and the [`Node`] sum type.
//!
//! Every node is a cheap handle around a shared allocation. Cloning a handle
//! never copies the tree; two handles are the *same node* iff they point at
//! the same allocation ([`TreeNode::ptr_eq`]). Containers own their children
//! through strong handles, children point back at their container through a
//! [`Weak`] link, so a child never keeps its parent alive.
//!
//! Dropping the last handle to a container drops its children in turn, one
//! stack frame per nesting level.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::array::ArrayNode;
use crate::container::Container;
use crate::object::ObjectNode;
use crate::scalar::{BooleanNode, NullNode, NumberNode, StringNode};

// ── Storage ───────────────────────────────────────────────────────────────

/// Shared allocation behind every node handle.
pub(crate) struct Slot<T> {
    pub(crate) link: ParentLink,
    pub(crate) data: RefCell<T>,
}

impl<T> Slot<T> {
    pub(crate) fn new(data: T) -> Rc<Self> {
        Rc::new(Self {
            link: ParentLink::new(),
            data: RefCell::new(data),
        })
    }
}

pub(crate) type ArraySlot = Slot<Vec<Node>>;
pub(crate) type ObjectSlot = Slot<IndexMap<String, Node>>;

/// Non-owning back-reference from a child to its container.
#[derive(Clone)]
pub(crate) enum WeakContainer {
    Array(Weak<ArraySlot>),
    Object(Weak<ObjectSlot>),
}

impl WeakContainer {
    fn upgrade(&self) -> Option<Container> {
        match self {
            WeakContainer::Array(slot) => slot
                .upgrade()
                .map(|slot| Container::Array(ArrayNode::from_slot(slot))),
            WeakContainer::Object(slot) => slot
                .upgrade()
                .map(|slot| Container::Object(ObjectNode::from_slot(slot))),
        }
    }
}

/// Parent-link cell carried by every node.
///
/// Opaque outside the crate: links are only rewritten by container
/// mutations and [`TreeNode::set_parent`].
pub struct ParentLink(RefCell<Option<WeakContainer>>);

impl ParentLink {
    fn new() -> Self {
        Self(RefCell::new(None))
    }

    pub(crate) fn get(&self) -> Option<Container> {
        self.0.borrow().as_ref().and_then(WeakContainer::upgrade)
    }

    pub(crate) fn set(&self, parent: Option<&Container>) {
        *self.0.borrow_mut() = parent.map(Container::downgrade);
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().take();
    }
}

pub(crate) mod sealed {
    pub trait Sealed {}
}

// ── Keys and kinds ────────────────────────────────────────────────────────

/// Position of a node under its container: an array index or an object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl Key {
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Index(_) => None,
            Key::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<usize> for Key {
    fn eq(&self, other: &usize) -> bool {
        self.as_index() == Some(*other)
    }
}

/// Runtime kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Number,
    String,
    Boolean,
    Null,
    Array,
    Object,
}

impl NodeKind {
    pub fn is_scalar(self) -> bool {
        !self.is_container()
    }

    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Array | NodeKind::Object)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Boolean => "boolean",
            NodeKind::Null => "null",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TreeNode ──────────────────────────────────────────────────────────────

/// Structural operations shared by every node handle.
///
/// Implemented by [`Node`], [`Container`], [`ArrayNode`], [`ObjectNode`] and
/// the scalar handles. The trait is sealed.
pub trait TreeNode: sealed::Sealed {
    #[doc(hidden)]
    fn link(&self) -> &ParentLink;

    #[doc(hidden)]
    fn addr(&self) -> *const ();

    /// Converts this handle into the [`Node`] sum type (same identity).
    fn to_node(&self) -> Node;

    fn kind(&self) -> NodeKind {
        self.to_node().kind()
    }

    /// Identity comparison: `true` iff both handles refer to the same node.
    fn ptr_eq(&self, other: &(impl TreeNode + ?Sized)) -> bool {
        self.addr() == other.addr()
    }

    /// The container currently holding this node, if any.
    fn parent(&self) -> Option<Container> {
        self.link().get()
    }

    /// Detaches this node from its current parent, then records `parent` as
    /// its parent.
    ///
    /// This does not insert the node into `parent`'s children; containers
    /// call it while attaching a node.
    fn set_parent(&self, parent: Option<&Container>) {
        self.delete();
        self.link().set(parent);
    }

    /// The index or key of this node under its parent, found by scanning the
    /// parent's entries for this node's identity.
    fn key(&self) -> Option<Key> {
        let parent = self.parent()?;
        let addr = self.addr();
        parent
            .entries()
            .find(|(_, child)| child.addr() == addr)
            .map(|(key, _)| key)
    }

    /// Removes this node from its parent, if any.
    fn delete(&self) -> &Self {
        if let Some(parent) = self.parent() {
            parent.delete_child(self);
        }
        self
    }

    /// Puts `node` into the slot this node occupies; this node ends up
    /// orphaned. No-op for a node without a parent.
    fn replace(&self, node: impl Into<Node>) -> &Self {
        if let Some(parent) = self.parent() {
            parent.replace_child(self, node);
        }
        self
    }
}

// ── Node ──────────────────────────────────────────────────────────────────

/// Any node of the tree.
#[derive(Clone)]
pub enum Node {
    Number(NumberNode),
    String(StringNode),
    Boolean(BooleanNode),
    Null(NullNode),
    Array(ArrayNode),
    Object(ObjectNode),
}

impl Node {
    pub fn number(value: impl Into<Number>) -> Self {
        Node::Number(NumberNode::new(value.into()))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::String(StringNode::new(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Node::Boolean(BooleanNode::new(value))
    }

    pub fn null() -> Self {
        Node::Null(NullNode::null())
    }

    pub fn array() -> Self {
        Node::Array(ArrayNode::new())
    }

    pub fn object() -> Self {
        Node::Object(ObjectNode::new())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Null(_) => NodeKind::Null,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.kind().is_scalar()
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    pub fn as_array(&self) -> Option<&ArrayNode> {
        match self {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Node::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<Container> {
        match self {
            Node::Array(array) => Some(Container::Array(array.clone())),
            Node::Object(object) => Some(Container::Object(object.clone())),
            _ => None,
        }
    }

    /// The raw value of a scalar node; `None` for containers.
    pub fn scalar_value(&self) -> Option<Value> {
        match self {
            Node::Number(node) => Some(Value::Number(node.get())),
            Node::String(node) => Some(Value::String(node.get())),
            Node::Boolean(node) => Some(Value::Bool(node.get())),
            Node::Null(_) => Some(Value::Null),
            Node::Array(_) | Node::Object(_) => None,
        }
    }
}

impl sealed::Sealed for Node {}

impl TreeNode for Node {
    fn link(&self) -> &ParentLink {
        match self {
            Node::Number(node) => node.link(),
            Node::String(node) => node.link(),
            Node::Boolean(node) => node.link(),
            Node::Null(node) => node.link(),
            Node::Array(node) => node.link(),
            Node::Object(node) => node.link(),
        }
    }

    fn addr(&self) -> *const () {
        match self {
            Node::Number(node) => node.addr(),
            Node::String(node) => node.addr(),
            Node::Boolean(node) => node.addr(),
            Node::Null(node) => node.addr(),
            Node::Array(node) => node.addr(),
            Node::Object(node) => node.addr(),
        }
    }

    fn to_node(&self) -> Node {
        self.clone()
    }

    fn kind(&self) -> NodeKind {
        Node::kind(self)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(node) => node.fmt(f),
            Node::String(node) => node.fmt(f),
            Node::Boolean(node) => node.fmt(f),
            Node::Null(node) => node.fmt(f),
            Node::Array(node) => node.fmt(f),
            Node::Object(node) => node.fmt(f),
        }
    }
}

impl From<ArrayNode> for Node {
    fn from(node: ArrayNode) -> Self {
        Node::Array(node)
    }
}

impl From<ObjectNode> for Node {
    fn from(node: ObjectNode) -> Self {
        Node::Object(node)
    }
}

impl From<&ArrayNode> for Node {
    fn from(node: &ArrayNode) -> Self {
        Node::Array(node.clone())
    }
}

impl From<&ObjectNode> for Node {
    fn from(node: &ObjectNode) -> Self {
        Node::Object(node.clone())
    }
}

impl From<&Node> for Node {
    fn from(node: &Node) -> Self {
        node.clone()
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        match container {
            Container::Array(array) => Node::Array(array),
            Container::Object(object) => Node::Object(object),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphan_has_no_parent_or_key() {
        let node = Node::number(1);
        assert!(node.parent().is_none());
        assert!(node.key().is_none());
    }

    #[test]
    fn test_key_tracks_array_index() {
        let array = ArrayNode::new();
        let first = Node::string("a");
        let second = Node::string("b");
        array.push(&first);
        array.push(&second);
        assert_eq!(second.key(), Some(Key::Index(1)));

        first.delete();
        assert_eq!(second.key(), Some(Key::Index(0)));
        assert!(first.key().is_none());
    }

    #[test]
    fn test_key_tracks_object_name() {
        let object = ObjectNode::new();
        let node = Node::boolean(true);
        object.set("flag", &node);
        assert_eq!(node.key(), Some(Key::from("flag")));
        assert!(node.key().unwrap() == "flag");
    }

    #[test]
    fn test_identity_is_not_value_equality() {
        let a = Node::number(7);
        let b = Node::number(7);
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_parent_is_weak() {
        let child = Node::null();
        {
            let array = ArrayNode::new();
            array.push(&child);
            assert!(child.parent().is_some());
        }
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_replace_orphan_is_noop() {
        let node = Node::number(1);
        let other = Node::number(2);
        node.replace(&other);
        assert!(other.parent().is_none());
    }

    #[test]
    fn test_set_parent_detaches_from_previous_container() {
        let from = ArrayNode::new();
        let node = Node::null();
        from.push(&node);

        let to = Container::Object(ObjectNode::new());
        node.set_parent(Some(&to));
        assert_eq!(from.size(), 0);
        assert!(node.parent().unwrap().ptr_eq(&to));
        // Recording a parent does not insert.
        assert!(!to.includes(&node));
    }

    #[test]
    fn test_node_kind() {
        assert_eq!(Node::number(1).kind(), NodeKind::Number);
        assert_eq!(Node::object().kind(), NodeKind::Object);
        assert!(NodeKind::Null.is_scalar());
        assert!(NodeKind::Array.is_container());
        assert_eq!(NodeKind::Boolean.to_string(), "boolean");
    }
}
