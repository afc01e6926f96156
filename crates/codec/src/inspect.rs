//! Structural breakdown of an encoding.

use scale_types_util::u8a_to_hex;
use serde_json::{json, Map, Value};

/// One node of an encoding's layout.
///
/// `outer` holds the byte segments this node writes itself (length
/// prefixes, discriminants, fixed-width payloads) and `inner` the nodes of
/// nested values. A pre-order walk that concatenates every `outer`
/// reproduces the encoding the tree was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inspect {
    pub name: Option<String>,
    pub outer: Vec<Vec<u8>>,
    pub inner: Vec<Inspect>,
}

impl Inspect {
    /// A node owning a single byte segment and no children.
    pub fn leaf(bytes: Vec<u8>) -> Self {
        Self {
            name: None,
            outer: vec![bytes],
            inner: Vec::new(),
        }
    }

    /// A node with the given outer segments and children.
    pub fn new(outer: Vec<Vec<u8>>, inner: Vec<Inspect>) -> Self {
        Self {
            name: None,
            outer,
            inner,
        }
    }

    /// Labels the node.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Concatenates `outer` segments in pre-order.
    pub fn flatten(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<u8>) {
        for segment in &self.outer {
            out.extend_from_slice(segment);
        }
        for child in &self.inner {
            child.flatten_into(out);
        }
    }

    /// JSON rendering with segments as hex strings; empty fields are omitted.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(name) = &self.name {
            map.insert("name".into(), json!(name));
        }
        if !self.outer.is_empty() {
            let outer = self.outer.iter().map(|s| json!(u8a_to_hex(s))).collect();
            map.insert("outer".into(), Value::Array(outer));
        }
        if !self.inner.is_empty() {
            let inner = self.inner.iter().map(Inspect::to_json).collect();
            map.insert("inner".into(), Value::Array(inner));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_is_pre_order() {
        let tree = Inspect::new(
            vec![vec![0x08]],
            vec![
                Inspect::leaf(vec![1, 0]).named("a"),
                Inspect::new(vec![vec![0x01]], vec![Inspect::leaf(vec![2])]),
            ],
        );
        assert_eq!(tree.flatten(), vec![0x08, 1, 0, 0x01, 2]);
    }

    #[test]
    fn to_json_omits_empty_parts() {
        let tree = Inspect::new(vec![], vec![Inspect::leaf(vec![0xff]).named("x")]);
        assert_eq!(
            tree.to_json(),
            json!({"inner": [{"name": "x", "outer": ["0xff"]}]})
        );
    }
}
