//! `Serialize`/`Deserialize` for [`Node`], so a tree can be handed straight
//! to any serde encoder.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use crate::convert::build_tree;
use crate::node::Node;

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Number(number) => number.with(|n| n.serialize(serializer)),
            Node::String(string) => string.with(|s| serializer.serialize_str(s)),
            Node::Boolean(boolean) => serializer.serialize_bool(boolean.get()),
            Node::Null(_) => serializer.serialize_unit(),
            Node::Array(array) => {
                let mut seq = serializer.serialize_seq(Some(array.len()))?;
                for (_, child) in array.entries() {
                    seq.serialize_element(&child)?;
                }
                seq.end()
            }
            Node::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, child) in object.entries() {
                    map.serialize_entry(&key, &child)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| build_tree(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_matches_flatten() {
        let json = json!({"b": [1, 2.5, "x"], "a": {"n": null, "t": true}});
        let root = build_tree(&json);
        assert_eq!(serde_json::to_string(&root).unwrap(), json.to_string());
    }

    #[test]
    fn test_deserialize_builds_tree() {
        let root: Node = serde_json::from_str(r#"[{"foo": "bar"}]"#).unwrap();
        let foo = root.as_array().unwrap().get(0).unwrap();
        assert_eq!(
            foo.as_object().unwrap().get("foo").unwrap().scalar_value(),
            Some(json!("bar"))
        );
    }
}
