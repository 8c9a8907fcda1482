use crate::node::Node;
use crate::value::{put, vocabulary, wrap, Map};
use serde_json::Value;

vocabulary! {
    /// How scores of matching child objects combine into the parent score
    pub enum ScoreMode ("score mode") {
        Avg => "avg",
        Max => "max",
        Min => "min",
        None => "none",
        Sum => "sum",
    }
}

/// Query over nested objects at `path`
#[derive(Debug)]
pub struct NestedQuery {
    path: String,
    query: Box<dyn Node>,
    score_mode: Option<ScoreMode>,
    ignore_unmapped: bool,
}

impl NestedQuery {
    pub fn new(path: impl Into<String>, query: impl Node + 'static) -> Self {
        Self {
            path: path.into(),
            query: Box::new(query),
            score_mode: None,
            ignore_unmapped: false,
        }
    }

    pub fn score_mode(mut self, mode: ScoreMode) -> Self {
        self.score_mode = Some(mode);
        self
    }

    /// Emitted only when enabled; false is the engine default
    pub fn ignore_unmapped(mut self, enabled: bool) -> Self {
        self.ignore_unmapped = enabled;
        self
    }
}

impl Node for NestedQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("path", self.path.clone());
        params.insert("query".to_string(), self.query.produce().into());
        put(&mut params, "score_mode", self.score_mode);
        if self.ignore_unmapped {
            params.insert("ignore_unmapped".to_string(), Value::Bool(true));
        }
        wrap("nested", params)
    }
}
