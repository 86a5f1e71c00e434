//! JSON Pointer (RFC 6901) addressing of tree nodes.
//!
//! Paths are computed from the live parent links, so they reflect the
//! node's current position.

use crate::error::AstError;
use crate::node::{Key, Node, TreeNode};

/// Unescapes one pointer component: `~1` → `/`, then `~0` → `~`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes one pointer component: `~` → `~0`, then `/` → `~1`.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Keys from the topmost ancestor down to `node`; empty for a root.
pub fn path(node: &(impl TreeNode + ?Sized)) -> Vec<Key> {
    let mut steps = Vec::new();
    let mut current = node.to_node();
    while let Some(key) = current.key() {
        steps.push(key);
        match current.parent() {
            Some(parent) => current = parent.to_node(),
            None => break,
        }
    }
    steps.reverse();
    steps
}

/// Formats keys as a pointer string; `""` for the empty path.
pub fn format_pointer(path: &[Key]) -> String {
    let mut out = String::new();
    for key in path {
        out.push('/');
        match key {
            Key::Index(index) => out.push_str(&index.to_string()),
            Key::Name(name) => out.push_str(&escape_component(name)),
        }
    }
    out
}

/// The pointer string addressing `node` from its topmost ancestor.
///
/// # Example
///
/// ```
/// use json_joy_json_ast::{build_tree, pointer};
/// use serde_json::json;
///
/// let root = build_tree(&json!({"a/b": [0, {"c": 1}]}));
/// let c = pointer::find(&root, "/a~1b/1/c").unwrap().unwrap();
/// assert_eq!(pointer::pointer(&c), "/a~1b/1/c");
/// ```
pub fn pointer(node: &(impl TreeNode + ?Sized)) -> String {
    format_pointer(&path(node))
}

/// Array indices are decimal without leading zeros.
fn parse_index(step: &str) -> Option<usize> {
    let bytes = step.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return None;
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    step.parse().ok()
}

/// Resolves `pointer` starting at `root`.
///
/// Returns `Ok(None)` when a step does not exist; fails with
/// [`AstError::InvalidPointer`] when `pointer` is neither empty nor starts
/// with `/`.
pub fn find(root: &Node, pointer: &str) -> Result<Option<Node>, AstError> {
    if pointer.is_empty() {
        return Ok(Some(root.clone()));
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(AstError::InvalidPointer(pointer.to_string()));
    };
    let mut current = root.clone();
    for component in rest.split('/') {
        let step = unescape_component(component);
        let next = match &current {
            Node::Array(array) => parse_index(&step).and_then(|index| array.get(index)),
            Node::Object(object) => object.get(&step),
            _ => None,
        };
        match next {
            Some(node) => current = node,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}
