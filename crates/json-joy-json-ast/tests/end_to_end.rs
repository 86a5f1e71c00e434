use std::convert::Infallible;

use json_joy_json_ast::{
    build_tree, build_tree_from, flatten, flatten_into, pointer, traverse, AstError, Node,
    StringNode, TreeNode, Visitor,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

struct ReplaceFoo;

impl Visitor for ReplaceFoo {
    type Error = Infallible;

    fn visit_scalar(&mut self, node: &Node) -> Result<(), Infallible> {
        if node.key().is_some_and(|key| key == "foo") {
            node.replace(Node::string("qux"));
        }
        Ok(())
    }
}

#[test]
fn replace_scalar_under_key() {
    let root = build_tree(&json!([{"foo": "bar"}]));
    let root = traverse(&root, &mut ReplaceFoo).unwrap();
    assert_eq!(flatten(&root), json!([{"foo": "qux"}]));
}

struct SetFooInPlace;

impl Visitor for SetFooInPlace {
    type Error = Infallible;

    fn visit_string(&mut self, node: &StringNode) -> Result<(), Infallible> {
        if node.key().is_some_and(|key| key == "foo") {
            node.set("qux".to_string());
        }
        Ok(())
    }
}

#[test]
fn set_string_in_place_keeps_identity() {
    let root = build_tree(&json!([{"foo": "bar", "other": "bar"}]));
    let foo = pointer::find(&root, "/0/foo").unwrap().unwrap();
    traverse(&root, &mut SetFooInPlace).unwrap();
    assert_eq!(flatten(&root), json!([{"foo": "qux", "other": "bar"}]));
    assert!(pointer::find(&root, "/0/foo").unwrap().unwrap().ptr_eq(&foo));
}

#[test]
fn pointers_round_trip_through_find() {
    let root = build_tree(&json!({"a/b": [{"~k": null}], "": 1}));
    let leaf = pointer::find(&root, "/a~1b/0/~0k").unwrap().unwrap();
    assert_eq!(pointer::pointer(&leaf), "/a~1b/0/~0k");
    assert!(pointer::find(&root, "/").unwrap().is_some());
    assert!(pointer::find(&root, "/a~1b/1").unwrap().is_none());
    assert!(matches!(
        pointer::find(&root, "no-slash"),
        Err(AstError::InvalidPointer(_))
    ));
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Config {
    name: String,
    ports: Vec<u16>,
}

#[test]
fn typed_values_go_through_the_tree() {
    let config = Config {
        name: "svc".to_string(),
        ports: vec![80, 443],
    };
    let root = build_tree_from(&config).unwrap();
    let ports = pointer::find(&root, "/ports").unwrap().unwrap();
    ports.as_array().unwrap().push(Node::number(8080));

    let back: Config = flatten_into(&root).unwrap();
    assert_eq!(back.ports, vec![80, 443, 8080]);

    pointer::find(&root, "/name")
        .unwrap()
        .unwrap()
        .replace(Node::boolean(true));
    assert!(matches!(
        flatten_into::<Config>(&root),
        Err(AstError::InvalidNodeKind(_))
    ));
}
