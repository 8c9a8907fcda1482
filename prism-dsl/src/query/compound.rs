//! Compound queries wrapping other queries
//!
//! Children are moved into the parent. Clause lists keep insertion order,
//! which the engine relies on for `should` accounting.

use crate::node::{produce_all, Node};
use crate::value::{float, put, put_f32, wrap, Map};
use serde_json::Value;

// ============================================================================
// Bool
// ============================================================================

/// Minimum number (or percentage form) of `should` clauses that must match
#[derive(Debug, Clone, PartialEq)]
pub enum MinimumShouldMatch {
    Count(i16),
    Spec(String),
}

impl From<&MinimumShouldMatch> for Value {
    fn from(msm: &MinimumShouldMatch) -> Self {
        match msm {
            MinimumShouldMatch::Count(n) => Value::from(*n),
            MinimumShouldMatch::Spec(s) => Value::String(s.clone()),
        }
    }
}

#[derive(Debug, Default)]
pub struct BoolQuery {
    must: Vec<Box<dyn Node>>,
    filter: Vec<Box<dyn Node>>,
    must_not: Vec<Box<dyn Node>>,
    should: Vec<Box<dyn Node>>,
    minimum_should_match: Option<MinimumShouldMatch>,
    boost: Option<f32>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, query: impl Node + 'static) -> Self {
        self.must.push(Box::new(query));
        self
    }

    pub fn filter(mut self, query: impl Node + 'static) -> Self {
        self.filter.push(Box::new(query));
        self
    }

    pub fn must_not(mut self, query: impl Node + 'static) -> Self {
        self.must_not.push(Box::new(query));
        self
    }

    pub fn should(mut self, query: impl Node + 'static) -> Self {
        self.should.push(Box::new(query));
        self
    }

    pub fn minimum_should_match(mut self, count: i16) -> Self {
        self.minimum_should_match = Some(MinimumShouldMatch::Count(count));
        self
    }

    /// Percentage or combination form, e.g. `"75%"` or `"3<90%"`
    pub fn minimum_should_match_spec(mut self, spec: impl Into<String>) -> Self {
        self.minimum_should_match = Some(MinimumShouldMatch::Spec(spec.into()));
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    /// True when no clause of any role has been added
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.filter.is_empty()
            && self.must_not.is_empty()
            && self.should.is_empty()
    }
}

impl Node for BoolQuery {
    fn produce(&self) -> Map {
        let mut params = Map::new();
        for (key, clauses) in [
            ("must", &self.must),
            ("filter", &self.filter),
            ("must_not", &self.must_not),
            ("should", &self.should),
        ] {
            if !clauses.is_empty() {
                params.insert(key.to_string(), produce_all(clauses));
            }
        }
        put(
            &mut params,
            "minimum_should_match",
            self.minimum_should_match.as_ref(),
        );
        put_f32(&mut params, "boost", self.boost);
        wrap("bool", params)
    }
}

// ============================================================================
// Boosting
// ============================================================================

/// Demotes documents matching `negative` instead of excluding them.
/// All three parts are required and always emitted.
#[derive(Debug)]
pub struct BoostingQuery {
    positive: Box<dyn Node>,
    negative: Box<dyn Node>,
    negative_boost: f32,
}

impl BoostingQuery {
    pub fn new(
        positive: impl Node + 'static,
        negative: impl Node + 'static,
        negative_boost: f32,
    ) -> Self {
        Self {
            positive: Box::new(positive),
            negative: Box::new(negative),
            negative_boost,
        }
    }

    pub fn positive(mut self, query: impl Node + 'static) -> Self {
        self.positive = Box::new(query);
        self
    }

    pub fn negative(mut self, query: impl Node + 'static) -> Self {
        self.negative = Box::new(query);
        self
    }

    pub fn negative_boost(mut self, boost: f32) -> Self {
        self.negative_boost = boost;
        self
    }
}

impl Node for BoostingQuery {
    fn produce(&self) -> Map {
        let mut params = Map::new();
        params.insert("positive".to_string(), self.positive.produce().into());
        params.insert("negative".to_string(), self.negative.produce().into());
        params.insert("negative_boost".to_string(), float(self.negative_boost));
        wrap("boosting", params)
    }
}

// ============================================================================
// Constant score
// ============================================================================

#[derive(Debug)]
pub struct ConstantScoreQuery {
    filter: Box<dyn Node>,
    boost: Option<f32>,
}

impl ConstantScoreQuery {
    pub fn new(filter: impl Node + 'static) -> Self {
        Self {
            filter: Box::new(filter),
            boost: None,
        }
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Node for ConstantScoreQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("filter", self.filter.produce());
        put_f32(&mut params, "boost", self.boost);
        wrap("constant_score", params)
    }
}

// ============================================================================
// Disjunction max
// ============================================================================

#[derive(Debug, Default)]
pub struct DisMaxQuery {
    queries: Vec<Box<dyn Node>>,
    tie_breaker: Option<f32>,
}

impl DisMaxQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Node + 'static) -> Self {
        self.queries.push(Box::new(query));
        self
    }

    pub fn tie_breaker(mut self, tie_breaker: f32) -> Self {
        self.tie_breaker = Some(tie_breaker);
        self
    }
}

impl Node for DisMaxQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("queries", produce_all(&self.queries));
        put_f32(&mut params, "tie_breaker", self.tie_breaker);
        wrap("dis_max", params)
    }
}
