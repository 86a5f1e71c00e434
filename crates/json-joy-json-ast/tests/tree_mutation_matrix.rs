use json_joy_json_ast::{build_tree, flatten, ArrayNode, Container, Key, Node, ObjectNode, TreeNode};
use serde_json::json;

/// Every child of `container` points back at it, and every listed node
/// points at `container` iff it is a child.
fn assert_consistent(container: &Container, candidates: &[&Node]) {
    for (_, child) in container.entries() {
        let parent = child.parent().expect("child must have a parent");
        assert!(parent.ptr_eq(container), "child points at another container");
    }
    for node in candidates {
        let points_here = node.parent().is_some_and(|p| p.ptr_eq(container));
        assert_eq!(
            points_here,
            container.includes(*node),
            "parent link and membership disagree for {node:?}"
        );
    }
}

#[test]
fn push_moves_node_out_of_other_container() {
    let a = Node::number(1);
    let b = Node::number(2);
    let first = ArrayNode::new();
    let second = ArrayNode::new();
    first.extend([&a, &b]);

    assert_eq!(second.push(&a), 1);
    assert_eq!(first.size(), 1);
    assert!(first.get(0).unwrap().ptr_eq(&b));

    assert_consistent(&first.clone().into(), &[&a, &b]);
    assert_consistent(&second.clone().into(), &[&a, &b]);
}

#[test]
fn push_skips_node_already_present() {
    let a = Node::null();
    let array = ArrayNode::new();
    array.push(&a);
    assert_eq!(array.push(&a), 1);
    assert_eq!(array.extend([&a, &a]), 1);
    assert_consistent(&array.into(), &[&a]);
}

#[test]
fn set_on_occupied_key_orphans_old_occupant_in_place() {
    let object = ObjectNode::new();
    let old = Node::number(1);
    let new = Node::number(2);
    object.set("first", &old);
    object.set("second", Node::null());
    object.set("first", &new);

    assert!(old.parent().is_none());
    assert!(new.parent().unwrap().ptr_eq(&object));
    assert_eq!(new.key(), Some(Key::from("first")));
    assert_eq!(object.keys(), vec!["first", "second"]);
    assert_consistent(&object.into(), &[&old, &new]);

    let array = ArrayNode::new();
    let old = Node::number(1);
    let new = Node::number(2);
    array.extend([Node::null(), old.clone(), Node::null()]);
    array.set(1, &new);
    assert!(old.parent().is_none());
    assert_eq!(new.key(), Some(Key::Index(1)));
    assert_eq!(array.size(), 3);
    assert_consistent(&array.into(), &[&old, &new]);
}

#[test]
fn set_index_with_sibling_from_same_array() {
    let root = build_tree(&json!(["a", "b", "c"]));
    let array = root.as_array().unwrap();
    let [a, b, c] = [0, 1, 2].map(|index| array.get(index).unwrap());

    array.set(1, &a);
    assert_eq!(flatten(&root), json!(["a", "c"]));
    assert!(b.parent().is_none());
    assert_eq!(a.key(), Some(Key::Index(0)));
    assert_eq!(c.key(), Some(Key::Index(1)));
    assert_consistent(&array.clone().into(), &[&a, &b, &c]);
}

#[test]
fn replace_child_pulls_node_from_other_container() {
    let a = Node::string("a");
    let b = Node::string("b");
    let array = ArrayNode::new();
    let object = ObjectNode::new();
    array.push(&a);
    object.set("b", &b);
    object.set("c", Node::null());

    array.replace_child(&a, &b);
    assert_eq!(object.len(), 1);
    assert!(a.parent().is_none());
    assert!(b.parent().unwrap().ptr_eq(&array));
    assert_consistent(&array.clone().into(), &[&a, &b]);
    assert_consistent(&object.into(), &[&a, &b]);
}

#[test]
fn node_replace_and_delete_through_parent() {
    let root = build_tree(&json!({"a": [1, 2, 3]}));
    let list = root.as_object().unwrap().get("a").unwrap();
    let two = list.as_array().unwrap().get(1).unwrap();

    let replacement = Node::string("two");
    assert!(two.replace(&replacement).ptr_eq(&two));
    assert!(two.parent().is_none());
    assert_eq!(replacement.key(), Some(Key::Index(1)));
    assert_eq!(flatten(&root), json!({"a": [1, "two", 3]}));

    replacement.delete();
    assert!(replacement.parent().is_none());
    assert_eq!(flatten(&root), json!({"a": [1, 3]}));

    list.delete();
    assert_eq!(flatten(&root), json!({}));
    // The detached subtree stays intact.
    assert_eq!(flatten(&list), json!([1, 3]));
}

#[test]
fn clear_keeps_stale_parent_links() {
    let root = build_tree(&json!({"a": 1, "b": 2}));
    let object = root.as_object().unwrap();
    let a = object.get("a").unwrap();
    object.clear();

    assert_eq!(object.entries().count(), 0);
    assert!(a.parent().unwrap().ptr_eq(object));
    assert!(!object.includes(&a));
    assert!(a.key().is_none());

    // A stale link does not block moving the node elsewhere.
    let array = ArrayNode::new();
    array.push(&a);
    assert!(a.parent().unwrap().ptr_eq(&array));
}

#[test]
fn container_reports_keys_through_sum_type() {
    let root = build_tree(&json!({"x": [true]}));
    let container = root.as_container().unwrap();
    assert!(container.has("x"));
    assert!(!container.has(0usize));
    let inner = container.get("x").unwrap().as_container().unwrap();
    assert!(inner.has(0usize));
    inner.set(0usize, Node::boolean(false));
    assert_eq!(flatten(&root), json!({"x": [false]}));
}
