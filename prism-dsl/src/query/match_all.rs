use crate::node::Node;
use crate::value::{put_f32, wrap, Map};

/// `match_all`, or `match_none` when built with [`MatchAllQuery::none`]
#[derive(Debug, Clone)]
pub struct MatchAllQuery {
    all: bool,
    boost: Option<f32>,
}

impl MatchAllQuery {
    pub fn new() -> Self {
        Self {
            all: true,
            boost: None,
        }
    }

    pub fn none() -> Self {
        Self {
            all: false,
            boost: None,
        }
    }

    /// Ignored for `match_none`
    pub fn boost(mut self, boost: f32) -> Self {
        if self.all {
            self.boost = Some(boost);
        }
        self
    }
}

impl Default for MatchAllQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for MatchAllQuery {
    fn produce(&self) -> Map {
        let mut params = Map::new();
        put_f32(&mut params, "boost", self.boost);
        let kind = if self.all { "match_all" } else { "match_none" };
        wrap(kind, params)
    }
}
