//! Leaf nodes holding exactly one JSON scalar.

use std::fmt;
use std::rc::Rc;

use serde_json::Number;

use crate::node::{sealed, Node, ParentLink, Slot, TreeNode};

/// A leaf node holding one value of type `V`.
///
/// The value kind is fixed by `V`; [`set`](ScalarNode::set) overwrites the
/// value in place and keeps the node's identity and position in the tree.
pub struct ScalarNode<V> {
    slot: Rc<Slot<V>>,
}

pub type NumberNode = ScalarNode<Number>;
pub type StringNode = ScalarNode<String>;
pub type BooleanNode = ScalarNode<bool>;
/// Null marker; carries no value.
pub type NullNode = ScalarNode<()>;

impl<V> ScalarNode<V> {
    pub fn new(value: V) -> Self {
        Self {
            slot: Slot::new(value),
        }
    }

    /// Runs `f` against the held value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&*self.slot.data.borrow())
    }

    pub fn set(&self, value: V) {
        *self.slot.data.borrow_mut() = value;
    }
}

impl<V: Clone> ScalarNode<V> {
    pub fn get(&self) -> V {
        self.slot.data.borrow().clone()
    }
}

impl ScalarNode<()> {
    pub fn null() -> Self {
        Self::new(())
    }
}

impl<V> Clone for ScalarNode<V> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for ScalarNode<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScalarNode")
            .field(&*self.slot.data.borrow())
            .finish()
    }
}

macro_rules! scalar_node {
    ($value:ty, $variant:ident) => {
        impl sealed::Sealed for ScalarNode<$value> {}

        impl TreeNode for ScalarNode<$value> {
            fn link(&self) -> &ParentLink {
                &self.slot.link
            }

            fn addr(&self) -> *const () {
                Rc::as_ptr(&self.slot) as *const ()
            }

            fn to_node(&self) -> Node {
                Node::$variant(self.clone())
            }
        }

        impl From<ScalarNode<$value>> for Node {
            fn from(node: ScalarNode<$value>) -> Self {
                Node::$variant(node)
            }
        }

        impl From<&ScalarNode<$value>> for Node {
            fn from(node: &ScalarNode<$value>) -> Self {
                Node::$variant(node.clone())
            }
        }
    };
}

scalar_node!(Number, Number);
scalar_node!(String, String);
scalar_node!(bool, Boolean);
scalar_node!((), Null);
