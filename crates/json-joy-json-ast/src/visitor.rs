//! Per-kind visitor hooks and their dispatch.
//!
//! Dispatch calls the broad hook before the narrow one: for a scalar node,
//! `visit_scalar` runs first, then the hook for its exact kind. Containers
//! only get `visit_array` or `visit_object`.

use crate::array::ArrayNode;
use crate::node::Node;
use crate::object::ObjectNode;
use crate::scalar::{BooleanNode, NullNode, NumberNode, StringNode};

/// Hooks invoked by [`traverse`](crate::traverse). All hooks default to
/// no-ops; override the ones you need.
///
/// Hooks may mutate the tree, including the node being visited. The first
/// hook error stops the traversal.
///
/// # Example
///
/// ```
/// use json_joy_json_ast::{build_tree, traverse, StringNode, Visitor};
/// use serde_json::json;
/// use std::convert::Infallible;
///
/// struct Upper;
///
/// impl Visitor for Upper {
///     type Error = Infallible;
///
///     fn visit_string(&mut self, node: &StringNode) -> Result<(), Infallible> {
///         node.set(node.get().to_uppercase());
///         Ok(())
///     }
/// }
///
/// let root = build_tree(&json!({"a": "x", "b": ["y"]}));
/// traverse(&root, &mut Upper).unwrap();
/// assert_eq!(json_joy_json_ast::flatten(&root), json!({"a": "X", "b": ["Y"]}));
/// ```
pub trait Visitor {
    type Error;

    /// Entry point for one node; defaults to [`dispatch`].
    fn visit(&mut self, node: &Node) -> Result<(), Self::Error> {
        dispatch(self, node)
    }

    /// Called for every scalar node, before the kind-specific hook.
    fn visit_scalar(&mut self, _node: &Node) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_number(&mut self, _node: &NumberNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_string(&mut self, _node: &StringNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_boolean(&mut self, _node: &BooleanNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_null(&mut self, _node: &NullNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_array(&mut self, _node: &ArrayNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_object(&mut self, _node: &ObjectNode) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Invokes the hooks matching `node`'s kind.
pub fn dispatch<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) -> Result<(), V::Error> {
    if node.is_scalar() {
        visitor.visit_scalar(node)?;
    }
    match node {
        Node::Number(number) => visitor.visit_number(number),
        Node::String(string) => visitor.visit_string(string),
        Node::Boolean(boolean) => visitor.visit_boolean(boolean),
        Node::Null(null) => visitor.visit_null(null),
        Node::Array(array) => visitor.visit_array(array),
        Node::Object(object) => visitor.visit_object(object),
    }
}

#[cfg(feature = "async")]
pub use self::asynchronous::{dispatch_async, AsyncVisitor};

#[cfg(feature = "async")]
mod asynchronous {
    use async_trait::async_trait;

    use super::*;

    /// Async counterpart of [`Visitor`], driven by
    /// [`traverse_async`](crate::traverse_async).
    ///
    /// Every hook is awaited to completion before the next step of the walk
    /// starts. Nodes are not `Send`, so the futures are local.
    #[async_trait(?Send)]
    pub trait AsyncVisitor {
        type Error;

        async fn visit(&mut self, node: &Node) -> Result<(), Self::Error> {
            dispatch_async(self, node).await
        }

        async fn visit_scalar(&mut self, _node: &Node) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn visit_number(&mut self, _node: &NumberNode) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn visit_string(&mut self, _node: &StringNode) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn visit_boolean(&mut self, _node: &BooleanNode) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn visit_null(&mut self, _node: &NullNode) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn visit_array(&mut self, _node: &ArrayNode) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn visit_object(&mut self, _node: &ObjectNode) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    /// Awaits the hooks matching `node`'s kind, broad hook first.
    pub async fn dispatch_async<V: AsyncVisitor + ?Sized>(
        visitor: &mut V,
        node: &Node,
    ) -> Result<(), V::Error> {
        if node.is_scalar() {
            visitor.visit_scalar(node).await?;
        }
        match node {
            Node::Number(number) => visitor.visit_number(number).await,
            Node::String(string) => visitor.visit_string(string).await,
            Node::Boolean(boolean) => visitor.visit_boolean(boolean).await,
            Node::Null(null) => visitor.visit_null(null).await,
            Node::Array(array) => visitor.visit_array(array).await,
            Node::Object(object) => visitor.visit_object(object).await,
        }
    }
}
