//! Request envelopes: full search, query-only and count
//!
//! Envelopes are nodes too, so they encode through [`Encode`](crate::Encode)
//! like any clause. Each one can also be sent through a
//! [`SearchTransport`].

use crate::aggs::Aggregations;
use crate::error::Result;
use crate::highlight::Highlight;
use crate::node::{Aggregation, Node};
use crate::transport::{self, Endpoint, SearchTransport};
use crate::value::{put, strings, vocabulary, wrap, Map};
use serde_json::Value;
use std::time::Duration;

vocabulary! {
    pub enum SortOrder ("sort order") {
        Asc => "asc",
        Desc => "desc",
    }
}

/// Time units the search API accepts, largest first, in nanoseconds
const DURATION_UNITS: &[(u128, &str)] = &[
    (86_400_000_000_000, "d"),
    (3_600_000_000_000, "h"),
    (60_000_000_000, "m"),
    (1_000_000_000, "s"),
    (1_000_000, "ms"),
    (1_000, "micros"),
    (1, "nanos"),
];

/// Compact time value in the largest unit that divides `duration` exactly,
/// e.g. 20s stays `"20s"` and 1.5s becomes `"1500ms"`. Zero is `"0s"`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    DURATION_UNITS
        .iter()
        .find(|(size, _)| nanos % size == 0)
        .map(|(size, unit)| format!("{}{}", nanos / size, unit))
        .unwrap_or_else(|| format!("{nanos}nanos"))
}

// ============================================================================
// Search
// ============================================================================

/// Full `_search` request body
#[derive(Debug, Default)]
pub struct Search {
    query: Option<Box<dyn Node>>,
    aggs: Aggregations,
    post_filter: Option<Box<dyn Node>>,
    size: Option<u64>,
    from: Option<u64>,
    explain: Option<bool>,
    timeout: Option<Duration>,
    sort: Vec<(String, SortOrder)>,
    source_includes: Vec<String>,
    source_excludes: Vec<String>,
    highlight: Option<Highlight>,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Node + 'static) -> Self {
        self.query = Some(Box::new(query));
        self
    }

    /// Add an aggregation; repeated calls accumulate
    pub fn agg(mut self, agg: impl Aggregation + 'static) -> Self {
        self.aggs.push(agg);
        self
    }

    pub fn post_filter(mut self, filter: impl Node + 'static) -> Self {
        self.post_filter = Some(Box::new(filter));
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    pub fn explain(mut self, explain: bool) -> Self {
        self.explain = Some(explain);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Append a sort key; keys apply in the order added
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push((field.into(), order));
        self
    }

    pub fn source_includes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_includes = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn source_excludes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_excludes = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub async fn run<T>(&self, transport: &T, indices: &[&str]) -> Result<Vec<u8>>
    where
        T: SearchTransport + ?Sized,
    {
        transport::execute(transport, Endpoint::Search, indices, self).await
    }

    fn source_value(&self) -> Option<Value> {
        let mut source = Map::new();
        if !self.source_includes.is_empty() {
            source.insert("includes".to_string(), strings(&self.source_includes));
        }
        if !self.source_excludes.is_empty() {
            source.insert("excludes".to_string(), strings(&self.source_excludes));
        }
        (!source.is_empty()).then(|| source.into())
    }
}

impl Node for Search {
    fn produce(&self) -> Map {
        let mut map = Map::new();
        put(&mut map, "query", self.query.as_ref().map(|q| q.produce()));
        if !self.aggs.is_empty() {
            map.insert("aggs".to_string(), self.aggs.to_map().into());
        }
        put(
            &mut map,
            "post_filter",
            self.post_filter.as_ref().map(|q| q.produce()),
        );
        put(&mut map, "size", self.size);
        put(&mut map, "from", self.from);
        put(&mut map, "explain", self.explain);
        put(&mut map, "timeout", self.timeout.map(format_duration));
        if !self.sort.is_empty() {
            let sort = self
                .sort
                .iter()
                .map(|(field, order)| Value::Object(wrap(field, wrap("order", *order))))
                .collect();
            map.insert("sort".to_string(), Value::Array(sort));
        }
        put(&mut map, "_source", self.source_value());
        put(
            &mut map,
            "highlight",
            self.highlight.as_ref().map(Highlight::to_map),
        );
        map
    }
}

// ============================================================================
// Query-only and count envelopes
// ============================================================================

/// `{"query": ...}` for the `_search` endpoint
#[derive(Debug)]
pub struct QueryRequest {
    query: Box<dyn Node>,
}

impl QueryRequest {
    pub fn new(query: impl Node + 'static) -> Self {
        Self {
            query: Box::new(query),
        }
    }

    pub async fn run<T>(&self, transport: &T, indices: &[&str]) -> Result<Vec<u8>>
    where
        T: SearchTransport + ?Sized,
    {
        transport::execute(transport, Endpoint::Search, indices, self).await
    }
}

impl Node for QueryRequest {
    fn produce(&self) -> Map {
        wrap("query", self.query.produce())
    }
}

/// `{"query": ...}` for the `_count` endpoint
#[derive(Debug)]
pub struct CountRequest {
    query: Box<dyn Node>,
}

impl CountRequest {
    pub fn new(query: impl Node + 'static) -> Self {
        Self {
            query: Box::new(query),
        }
    }

    pub async fn run<T>(&self, transport: &T, indices: &[&str]) -> Result<Vec<u8>>
    where
        T: SearchTransport + ?Sized,
    {
        transport::execute(transport, Endpoint::Count, indices, self).await
    }
}

impl Node for CountRequest {
    fn produce(&self) -> Map {
        wrap("query", self.query.produce())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggs::{StringStatsAgg, SumAgg};
    use crate::node::Encode;
    use crate::query::{BoolQuery, MatchAllQuery, MatchQuery, RangeQuery, RangeRelation};
    use serde_json::json;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(20)), "20s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1500ms");
        assert_eq!(format_duration(Duration::from_secs(120)), "2m");
        assert_eq!(format_duration(Duration::from_secs(7200)), "2h");
        assert_eq!(format_duration(Duration::from_secs(172_800)), "2d");
        assert_eq!(format_duration(Duration::from_micros(5)), "5micros");
        assert_eq!(format_duration(Duration::from_nanos(1_001)), "1001nanos");
        assert_eq!(format_duration(Duration::ZERO), "0s");
    }

    #[test]
    fn test_simple_search() {
        let search = Search::new().query(MatchAllQuery::new()).size(20);
        assert_eq!(
            search.to_value(),
            json!({"query": {"match_all": {}}, "size": 20})
        );
    }

    #[test]
    fn test_empty_search() {
        assert_eq!(Search::new().to_value(), json!({}));
    }

    #[test]
    fn test_complex_search() {
        let search = Search::new()
            .query(
                BoolQuery::new()
                    .must(
                        RangeQuery::new("date")
                            .gt("some time in the past")
                            .lte("now")
                            .relation(RangeRelation::Contains)
                            .time_zone("Asia/Jerusalem")
                            .boost(2.3),
                    )
                    .must(
                        MatchQuery::new("author", "some guy")
                            .analyzer("analyzer?")
                            .fuzziness("fuzz"),
                    )
                    .boost(3.1),
            )
            .agg(SumAgg::new("total_score", "score"))
            .agg(StringStatsAgg::new("tag_stats", "tags").show_distribution(true))
            .post_filter(RangeQuery::new("score").gt(0))
            .size(30)
            .from(5)
            .explain(true)
            .sort("field_1", SortOrder::Desc)
            .sort("field_2", SortOrder::Asc)
            .source_includes(["field_1", "field_2"])
            .source_excludes(["field_3"])
            .timeout(Duration::from_secs(20));

        assert_eq!(
            search.to_value(),
            json!({
                "query": {"bool": {
                    "must": [
                        {"range": {"date": {
                            "gt": "some time in the past",
                            "lte": "now",
                            "relation": "CONTAINS",
                            "time_zone": "Asia/Jerusalem",
                            "boost": 2.3
                        }}},
                        {"match": {"author": {
                            "query": "some guy",
                            "analyzer": "analyzer?",
                            "fuzziness": "fuzz"
                        }}}
                    ],
                    "boost": 3.1
                }},
                "aggs": {
                    "total_score": {"sum": {"field": "score"}},
                    "tag_stats": {"string_stats": {"field": "tags", "show_distribution": true}}
                },
                "post_filter": {"range": {"score": {"gt": 0}}},
                "size": 30,
                "from": 5,
                "explain": true,
                "timeout": "20s",
                "sort": [
                    {"field_1": {"order": "desc"}},
                    {"field_2": {"order": "asc"}}
                ],
                "_source": {
                    "includes": ["field_1", "field_2"],
                    "excludes": ["field_3"]
                }
            })
        );
    }

    #[test]
    fn test_search_with_highlight() {
        let search = Search::new()
            .query(MatchQuery::new("content", "kimchy"))
            .highlight(Highlight::new().field("content"));
        assert_eq!(
            search.to_value()["highlight"],
            json!({"fields": {"content": {}}})
        );
    }

    #[test]
    fn test_source_excludes_only() {
        let search = Search::new().source_excludes(["secret"]);
        assert_eq!(search.to_value(), json!({"_source": {"excludes": ["secret"]}}));
    }

    #[test]
    fn test_query_and_count_envelopes() {
        assert_eq!(
            QueryRequest::new(MatchAllQuery::new()).to_value(),
            json!({"query": {"match_all": {}}})
        );
        assert_eq!(
            CountRequest::new(MatchAllQuery::new()).to_value(),
            json!({"query": {"match_all": {}}})
        );
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("DESC".parse::<SortOrder>().is_err());
    }
}
