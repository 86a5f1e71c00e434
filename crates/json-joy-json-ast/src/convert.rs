//! Conversion between plain [`Value`]s and trees.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::array::ArrayNode;
use crate::error::AstError;
use crate::node::Node;
use crate::object::ObjectNode;

/// Builds a fresh tree from a plain value.
///
/// Array elements are pushed in order; object entries are set in the map's
/// own key order (source order, since `serde_json` preserves it here).
///
/// Recurses once per nesting level with no depth bound. Values decoded by
/// `serde_json`'s parser stay within its 128-level limit; a value built by
/// hand can nest deeper and exhaust the stack.
///
/// # Example
///
/// ```
/// use json_joy_json_ast::{build_tree, Node};
/// use serde_json::json;
///
/// let root = build_tree(&json!([{"a1": 123}]));
/// let first = root.as_array().unwrap().get(0).unwrap();
/// assert!(matches!(first.as_object().unwrap().get("a1"), Some(Node::Number(_))));
/// ```
pub fn build_tree(value: &Value) -> Node {
    match value {
        Value::Null => Node::null(),
        Value::Bool(value) => Node::boolean(*value),
        Value::Number(value) => Node::number(value.clone()),
        Value::String(value) => Node::string(value.clone()),
        Value::Array(items) => {
            let array = ArrayNode::new();
            array.extend(items.iter().map(build_tree));
            Node::Array(array)
        }
        Value::Object(map) => {
            let object = ObjectNode::new();
            for (key, item) in map {
                object.set(key.clone(), build_tree(item));
            }
            Node::Object(object)
        }
    }
}

/// Produces the plain value of the tree under `node`.
///
/// Recurses once per nesting level, like [`build_tree`].
///
/// # Example
///
/// ```
/// use json_joy_json_ast::{build_tree, flatten};
/// use serde_json::json;
///
/// let json = json!([{"a1": "a1v", "a2": {"b1": "b1v"}}]);
/// assert_eq!(flatten(&build_tree(&json)), json);
/// ```
pub fn flatten(node: &Node) -> Value {
    match node {
        Node::Number(number) => Value::Number(number.get()),
        Node::String(string) => Value::String(string.get()),
        Node::Boolean(boolean) => Value::Bool(boolean.get()),
        Node::Null(_) => Value::Null,
        Node::Array(array) => Value::Array(array.entries().map(|(_, child)| flatten(&child)).collect()),
        Node::Object(object) => Value::Object(
            object
                .entries()
                .map(|(key, child)| (key, flatten(&child)))
                .collect(),
        ),
    }
}

/// Builds a tree from anything serde can describe.
///
/// Fails with [`AstError::UnsupportedValueKind`] when `value` falls outside
/// null, bool, number, string, array and string-keyed object.
pub fn build_tree_from<T: Serialize + ?Sized>(value: &T) -> Result<Node, AstError> {
    let value = serde_json::to_value(value).map_err(|err| {
        debug!(error = %err, "value is not representable as json");
        AstError::UnsupportedValueKind(err.to_string())
    })?;
    Ok(build_tree(&value))
}

/// Flattens the tree under `node` straight into a typed value.
///
/// Fails with [`AstError::InvalidNodeKind`] when the tree's node kinds do not
/// fit `T`.
pub fn flatten_into<T: DeserializeOwned>(node: &Node) -> Result<T, AstError> {
    serde_json::from_value(flatten(node)).map_err(|err| {
        debug!(error = %err, kind = %node.kind(), "tree does not fit target type");
        AstError::InvalidNodeKind(err.to_string())
    })
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        build_tree(&value)
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        build_tree(value)
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        flatten(node)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        flatten(&node)
    }
}
