//! Aggregation nodes and the `aggs` envelope
//!
//! An aggregation carries its own name; only the containing [`Aggregations`]
//! set turns names into keys.

mod bucket;
mod custom;
mod metric;

pub use bucket::{
    DateHistogramAgg, DateInterval, FilterAgg, HistogramAgg, NestedAgg, TermsAgg, TermsFilter,
};
pub use custom::CustomAgg;
pub use metric::{
    AvgAgg, CardinalityAgg, FieldSource, MaxAgg, MinAgg, PercentilesAgg, StatsAgg,
    StringStatsAgg, SumAgg, ValueCountAgg, WeightedAvgAgg,
};

use crate::error::Result;
use crate::node::{Aggregation, Node};
use crate::transport::{self, Endpoint, SearchTransport};
use crate::value::{wrap, Map};

/// Named aggregations, kept in insertion order
#[derive(Debug, Default)]
pub struct Aggregations {
    entries: Vec<Box<dyn Aggregation>>,
}

impl Aggregations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, agg: impl Aggregation + 'static) {
        self.entries.push(Box::new(agg));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|a| a.name())
    }

    /// `{name: body}`; on duplicate names the later entry wins
    pub fn to_map(&self) -> Map {
        let mut map = Map::new();
        for agg in &self.entries {
            map.insert(agg.name().to_string(), agg.produce().into());
        }
        map
    }
}

/// Aggregation-only request: `{"aggs": {...}}`
#[derive(Debug, Default)]
pub struct AggregationRequest {
    aggs: Aggregations,
}

impl AggregationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agg(mut self, agg: impl Aggregation + 'static) -> Self {
        self.aggs.push(agg);
        self
    }

    pub fn aggregations(&self) -> &Aggregations {
        &self.aggs
    }

    /// Send to the `_search` endpoint of `indices`
    pub async fn run<T>(&self, transport: &T, indices: &[&str]) -> Result<Vec<u8>>
    where
        T: SearchTransport + ?Sized,
    {
        transport::execute(transport, Endpoint::Search, indices, self).await
    }
}

impl Node for AggregationRequest {
    fn produce(&self) -> Map {
        wrap("aggs", self.aggs.to_map())
    }
}
