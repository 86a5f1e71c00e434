//! Mutable JSON tree (AST) with parent-tracked nodes.
//!
//! A decoded [`serde_json::Value`] is turned into a tree of nodes with
//! [`build_tree`], edited in place, walked with a [`Visitor`] through
//! [`traverse`], and turned back into a plain value with [`flatten`].
//!
//! # Model
//!
//! | Type | Role |
//! |------|------|
//! | [`Node`] | any node; sum type over the six kinds |
//! | [`ScalarNode`] | leaf: [`NumberNode`], [`StringNode`], [`BooleanNode`], [`NullNode`] |
//! | [`ArrayNode`] | index-ordered container |
//! | [`ObjectNode`] | insertion-ordered, string-keyed container |
//! | [`Container`] | either container, addressed by [`Key`] |
//! | [`TreeNode`] | `parent` / `key` / `delete` / `replace`, shared by all handles |
//!
//! Nodes are reference-counted handles; identity (not value) decides
//! membership. A node belongs to at most one container: every operation that
//! places a node somewhere detaches it from its previous parent first.
//!
//! # Example
//!
//! ```
//! use json_joy_json_ast::{build_tree, flatten, traverse, Node, TreeNode, Visitor};
//! use serde_json::json;
//! use std::convert::Infallible;
//!
//! struct Foo;
//!
//! impl Visitor for Foo {
//!     type Error = Infallible;
//!
//!     fn visit_scalar(&mut self, node: &Node) -> Result<(), Infallible> {
//!         if node.key().is_some_and(|key| key == "foo") {
//!             node.replace(Node::string("qux"));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let root = build_tree(&json!([{"foo": "bar"}]));
//! let root = traverse(&root, &mut Foo).unwrap();
//! assert_eq!(flatten(&root), json!([{"foo": "qux"}]));
//! ```
//!
//! # Features
//!
//! - `async` (default): [`AsyncVisitor`] and [`traverse_async`].

mod array;
mod container;
mod convert;
mod error;
mod node;
mod object;
mod scalar;
mod serde_impl;
mod traverse;
mod visitor;

pub mod pointer;

pub use array::{ArrayEntries, ArrayNode};
pub use container::{Container, Entries};
pub use convert::{build_tree, build_tree_from, flatten, flatten_into};
pub use error::AstError;
pub use node::{Key, Node, NodeKind, TreeNode};
pub use object::{ObjectEntries, ObjectNode};
pub use scalar::{BooleanNode, NullNode, NumberNode, ScalarNode, StringNode};
pub use traverse::traverse;
pub use visitor::{dispatch, Visitor};

#[cfg(feature = "async")]
pub use traverse::traverse_async;
#[cfg(feature = "async")]
pub use visitor::{dispatch_async, AsyncVisitor};
