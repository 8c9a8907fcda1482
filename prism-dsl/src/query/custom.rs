use crate::node::Node;
use crate::value::Map;

/// Raw query injected verbatim.
///
/// Nothing about the map is checked: no type key, no elision, no vocabulary
/// rules. Use it for engine features this crate does not model.
#[derive(Debug, Clone, Default)]
pub struct CustomQuery {
    body: Map,
}

impl CustomQuery {
    pub fn new(body: Map) -> Self {
        Self { body }
    }

    /// Build from any JSON value; non-object values yield an empty map.
    pub fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(body) => Self { body },
            _ => Self::default(),
        }
    }
}

impl Node for CustomQuery {
    fn produce(&self) -> Map {
        self.body.clone()
    }
}
