use crate::node::{Aggregation, Node};
use crate::value::Map;

/// Raw aggregation body filed under `name`, emitted verbatim
#[derive(Debug, Clone)]
pub struct CustomAgg {
    name: String,
    body: Map,
}

impl CustomAgg {
    pub fn new(name: impl Into<String>, body: Map) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    /// Non-object values yield an empty body.
    pub fn from_value(name: impl Into<String>, value: serde_json::Value) -> Self {
        let body = match value {
            serde_json::Value::Object(body) => body,
            _ => Map::new(),
        };
        Self::new(name, body)
    }
}

impl Node for CustomAgg {
    fn produce(&self) -> Map {
        self.body.clone()
    }
}

impl Aggregation for CustomAgg {
    fn name(&self) -> &str {
        &self.name
    }
}
