//! Pre-order depth-first traversal.
//!
//! A node is visited (full dispatch) before any of its children, and one
//! child's subtree is finished before the next child is read. Children are
//! read from the live container at every step, never from a snapshot: a hook
//! that detaches, replaces or adds nodes is observed by every later step.

use tracing::debug;

use crate::node::Node;
use crate::visitor::Visitor;

/// Walks the tree under `root`, driving `visitor`, and returns `root`.
///
/// The first hook error aborts the walk and is returned as is. The walk
/// recurses once per nesting level with no depth bound.
pub fn traverse<V: Visitor + ?Sized>(root: &Node, visitor: &mut V) -> Result<Node, V::Error> {
    debug!(kind = %root.kind(), "traversal started");
    walk(root, visitor)?;
    debug!("traversal finished");
    Ok(root.clone())
}

fn walk<V: Visitor + ?Sized>(node: &Node, visitor: &mut V) -> Result<(), V::Error> {
    visitor.visit(node)?;
    match node {
        Node::Array(array) => {
            for (_, child) in array.entries() {
                walk(&child, visitor)?;
            }
        }
        Node::Object(object) => {
            for (_, child) in object.entries() {
                walk(&child, visitor)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(feature = "async")]
pub use self::asynchronous::traverse_async;

#[cfg(feature = "async")]
mod asynchronous {
    use futures::future::{FutureExt, LocalBoxFuture};
    use tracing::debug;

    use crate::node::Node;
    use crate::visitor::AsyncVisitor;

    /// Async form of [`traverse`](crate::traverse): each visit and each
    /// descent is awaited before the next step starts.
    pub async fn traverse_async<V: AsyncVisitor + ?Sized>(
        root: &Node,
        visitor: &mut V,
    ) -> Result<Node, V::Error> {
        debug!(kind = %root.kind(), "async traversal started");
        walk(root, visitor).await?;
        debug!("async traversal finished");
        Ok(root.clone())
    }

    fn walk<'a, V: AsyncVisitor + ?Sized>(
        node: &'a Node,
        visitor: &'a mut V,
    ) -> LocalBoxFuture<'a, Result<(), V::Error>> {
        async move {
            visitor.visit(node).await?;
            match node {
                Node::Array(array) => {
                    for (_, child) in array.entries() {
                        walk(&child, &mut *visitor).await?;
                    }
                }
                Node::Object(object) => {
                    for (_, child) in object.entries() {
                        walk(&child, &mut *visitor).await?;
                    }
                }
                _ => {}
            }
            Ok::<(), V::Error>(())
        }
        .boxed_local()
    }
}
