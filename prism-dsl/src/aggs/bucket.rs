//! Bucket aggregations
//!
//! A bucket aggregation emits its type key and, when sub-aggregations were
//! added, a sibling `"aggs"` key holding them by name.

use super::Aggregations;
use crate::node::{Aggregation, Node};
use crate::search::SortOrder;
use crate::value::{put, put_scalar, strings, wrap, Map, Scalar};
use serde_json::Value;

/// Adds the sibling `"aggs"` key when there is anything to add
fn with_sub_aggs(kind: &str, params: Map, subs: &Aggregations) -> Map {
    let mut map = wrap(kind, params);
    if !subs.is_empty() {
        map.insert("aggs".to_string(), subs.to_map().into());
    }
    map
}

macro_rules! sub_aggs_setter {
    () => {
        /// Nest another aggregation under this one's buckets
        pub fn agg(mut self, agg: impl Aggregation + 'static) -> Self {
            self.aggs.push(agg);
            self
        }
    };
}

// ============================================================================
// Terms
// ============================================================================

/// Term filter for `include`/`exclude`: one regex, or exact values
#[derive(Debug, Clone, PartialEq)]
pub enum TermsFilter {
    Pattern(String),
    Values(Vec<String>),
}

impl From<&TermsFilter> for Value {
    fn from(filter: &TermsFilter) -> Self {
        match filter {
            TermsFilter::Pattern(p) => Value::String(p.clone()),
            TermsFilter::Values(v) => strings(v),
        }
    }
}

/// One bucket per unique value of `field`
#[derive(Debug)]
pub struct TermsAgg {
    name: String,
    field: String,
    size: Option<u64>,
    shard_size: Option<u64>,
    min_doc_count: Option<u64>,
    missing: Option<Scalar>,
    order: Vec<(String, SortOrder)>,
    include: Option<TermsFilter>,
    exclude: Option<TermsFilter>,
    aggs: Aggregations,
}

impl TermsAgg {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            size: None,
            shard_size: None,
            min_doc_count: None,
            missing: None,
            order: Vec::new(),
            include: None,
            exclude: None,
            aggs: Aggregations::new(),
        }
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn shard_size(mut self, size: u64) -> Self {
        self.shard_size = Some(size);
        self
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.min_doc_count = Some(count);
        self
    }

    pub fn missing(mut self, value: impl Into<Scalar>) -> Self {
        self.missing = Some(value.into());
        self
    }

    /// Add a sort criterion, e.g. `("_count", Desc)` or a sub-aggregation name.
    /// Criteria apply in the order they were added.
    pub fn order(mut self, key: impl Into<String>, direction: SortOrder) -> Self {
        self.order.push((key.into(), direction));
        self
    }

    pub fn include_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.include = Some(TermsFilter::Pattern(pattern.into()));
        self
    }

    pub fn include_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(TermsFilter::Values(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(TermsFilter::Pattern(pattern.into()));
        self
    }

    pub fn exclude_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(TermsFilter::Values(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    sub_aggs_setter!();

    fn order_value(&self) -> Option<Value> {
        let criterion = |(key, dir): &(String, SortOrder)| Value::Object(wrap(key, *dir));
        match self.order.as_slice() {
            [] => None,
            [single] => Some(criterion(single)),
            many => Some(Value::Array(many.iter().map(criterion).collect())),
        }
    }
}

impl Node for TermsAgg {
    fn produce(&self) -> Map {
        let mut params = wrap("field", self.field.clone());
        put(&mut params, "size", self.size);
        put(&mut params, "shard_size", self.shard_size);
        put(&mut params, "min_doc_count", self.min_doc_count);
        put_scalar(&mut params, "missing", self.missing.as_ref());
        put(&mut params, "order", self.order_value());
        put(&mut params, "include", self.include.as_ref());
        put(&mut params, "exclude", self.exclude.as_ref());
        with_sub_aggs("terms", params, &self.aggs)
    }
}

impl Aggregation for TermsAgg {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Single bucket of the documents matching a query
#[derive(Debug)]
pub struct FilterAgg {
    name: String,
    filter: Box<dyn Node>,
    aggs: Aggregations,
}

impl FilterAgg {
    pub fn new(name: impl Into<String>, filter: impl Node + 'static) -> Self {
        Self {
            name: name.into(),
            filter: Box::new(filter),
            aggs: Aggregations::new(),
        }
    }

    pub fn filter(mut self, filter: impl Node + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    sub_aggs_setter!();
}

impl Node for FilterAgg {
    fn produce(&self) -> Map {
        with_sub_aggs("filter", self.filter.produce(), &self.aggs)
    }
}

impl Aggregation for FilterAgg {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Nested
// ============================================================================

#[derive(Debug)]
pub struct NestedAgg {
    name: String,
    path: String,
    aggs: Aggregations,
}

impl NestedAgg {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            aggs: Aggregations::new(),
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    sub_aggs_setter!();
}

impl Node for NestedAgg {
    fn produce(&self) -> Map {
        with_sub_aggs("nested", wrap("path", self.path.clone()), &self.aggs)
    }
}

impl Aggregation for NestedAgg {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Histogram
// ============================================================================

/// Fixed-width numeric buckets
#[derive(Debug)]
pub struct HistogramAgg {
    name: String,
    field: String,
    interval: Scalar,
    min_doc_count: Option<u64>,
    offset: Option<Scalar>,
    missing: Option<Scalar>,
    aggs: Aggregations,
}

impl HistogramAgg {
    pub fn new(
        name: impl Into<String>,
        field: impl Into<String>,
        interval: impl Into<Scalar>,
    ) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            interval: interval.into(),
            min_doc_count: None,
            offset: None,
            missing: None,
            aggs: Aggregations::new(),
        }
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.min_doc_count = Some(count);
        self
    }

    pub fn offset(mut self, offset: impl Into<Scalar>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn missing(mut self, value: impl Into<Scalar>) -> Self {
        self.missing = Some(value.into());
        self
    }

    sub_aggs_setter!();
}

impl Node for HistogramAgg {
    fn produce(&self) -> Map {
        let mut params = wrap("field", self.field.clone());
        params.insert("interval".to_string(), self.interval.to_value());
        put(&mut params, "min_doc_count", self.min_doc_count);
        put_scalar(&mut params, "offset", self.offset.as_ref());
        put_scalar(&mut params, "missing", self.missing.as_ref());
        with_sub_aggs("histogram", params, &self.aggs)
    }
}

impl Aggregation for HistogramAgg {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Date histogram
// ============================================================================

/// Calendar-aware (`1M`, `1w`) or fixed (`90m`, `2d`) bucket width
#[derive(Debug, Clone, PartialEq)]
pub enum DateInterval {
    Calendar(String),
    Fixed(String),
}

impl DateInterval {
    fn key(&self) -> &'static str {
        match self {
            DateInterval::Calendar(_) => "calendar_interval",
            DateInterval::Fixed(_) => "fixed_interval",
        }
    }

    fn text(&self) -> &str {
        match self {
            DateInterval::Calendar(s) | DateInterval::Fixed(s) => s,
        }
    }
}

#[derive(Debug)]
pub struct DateHistogramAgg {
    name: String,
    field: String,
    interval: DateInterval,
    format: Option<String>,
    time_zone: Option<String>,
    min_doc_count: Option<u64>,
    aggs: Aggregations,
}

impl DateHistogramAgg {
    pub fn new(name: impl Into<String>, field: impl Into<String>, interval: DateInterval) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            interval,
            format: None,
            time_zone: None,
            min_doc_count: None,
            aggs: Aggregations::new(),
        }
    }

    pub fn calendar(
        name: impl Into<String>,
        field: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self::new(name, field, DateInterval::Calendar(interval.into()))
    }

    pub fn fixed(
        name: impl Into<String>,
        field: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self::new(name, field, DateInterval::Fixed(interval.into()))
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn time_zone(mut self, tz: impl Into<String>) -> Self {
        self.time_zone = Some(tz.into());
        self
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.min_doc_count = Some(count);
        self
    }

    sub_aggs_setter!();
}

impl Node for DateHistogramAgg {
    fn produce(&self) -> Map {
        let mut params = wrap("field", self.field.clone());
        params.insert(
            self.interval.key().to_string(),
            Value::String(self.interval.text().to_string()),
        );
        put(&mut params, "format", self.format.clone());
        put(&mut params, "time_zone", self.time_zone.clone());
        put(&mut params, "min_doc_count", self.min_doc_count);
        with_sub_aggs("date_histogram", params, &self.aggs)
    }
}

impl Aggregation for DateHistogramAgg {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggs::{AvgAgg, SumAgg};
    use crate::node::Encode;
    use crate::query::TermQuery;
    use serde_json::json;

    #[test]
    fn test_filter_agg_simple() {
        let agg = FilterAgg::new("filtered", TermQuery::new("type", "t-shirt"));
        assert_eq!(
            agg.to_value(),
            json!({"filter": {"term": {"type": {"value": "t-shirt"}}}})
        );
    }

    #[test]
    fn test_filter_agg_with_sub_aggs() {
        let agg = FilterAgg::new("filtered", TermQuery::new("type", "t-shirt"))
            .agg(AvgAgg::new("avg_price", "price"));
        assert_eq!(
            agg.to_value(),
            json!({
                "filter": {"term": {"type": {"value": "t-shirt"}}},
                "aggs": {"avg_price": {"avg": {"field": "price"}}}
            })
        );
    }

    #[test]
    fn test_nested_agg() {
        assert_eq!(
            NestedAgg::new("simple", "categories").to_value(),
            json!({"nested": {"path": "categories"}})
        );
        assert_eq!(
            NestedAgg::new("more_nested", "authors")
                .agg(TermsAgg::new("authors", "name"))
                .to_value(),
            json!({
                "nested": {"path": "authors"},
                "aggs": {"authors": {"terms": {"field": "name"}}}
            })
        );
    }

    #[test]
    fn test_terms_single_order_is_a_map() {
        let agg = TermsAgg::new("categories", "categories")
            .order("priceSum", SortOrder::Desc)
            .size(5)
            .agg(SumAgg::new("priceSum", "price"));
        assert_eq!(
            agg.to_value(),
            json!({
                "terms": {
                    "field": "categories",
                    "order": {"priceSum": "desc"},
                    "size": 5
                },
                "aggs": {"priceSum": {"sum": {"field": "price"}}}
            })
        );
    }

    #[test]
    fn test_terms_multiple_orders_keep_sequence() {
        let agg = TermsAgg::new("genres", "genre")
            .order("_count", SortOrder::Desc)
            .order("_key", SortOrder::Asc);
        assert_eq!(
            agg.to_value()["terms"]["order"],
            json!([{"_count": "desc"}, {"_key": "asc"}])
        );
    }

    #[test]
    fn test_terms_include_forms() {
        assert_eq!(
            TermsAgg::new("categories", "categories")
                .include_pattern("red.*|blue.*")
                .to_value(),
            json!({"terms": {"field": "categories", "include": "red.*|blue.*"}})
        );
        assert_eq!(
            TermsAgg::new("categories", "categories")
                .include_values(["red", "blue"])
                .exclude_values(["green"])
                .to_value(),
            json!({"terms": {
                "field": "categories",
                "include": ["red", "blue"],
                "exclude": ["green"]
            }})
        );
    }

    #[test]
    fn test_terms_all_counts() {
        let agg = TermsAgg::new("tags", "tags")
            .size(0)
            .shard_size(100)
            .min_doc_count(0)
            .missing("N/A")
            .exclude_pattern("water_.*");
        assert_eq!(
            agg.to_value(),
            json!({"terms": {
                "field": "tags",
                "size": 0,
                "shard_size": 100,
                "min_doc_count": 0,
                "missing": "N/A",
                "exclude": "water_.*"
            }})
        );
    }

    #[test]
    fn test_histogram() {
        let agg = HistogramAgg::new("prices", "price", 50)
            .min_doc_count(1)
            .offset(5)
            .missing(0);
        assert_eq!(
            agg.to_value(),
            json!({"histogram": {
                "field": "price",
                "interval": 50,
                "min_doc_count": 1,
                "offset": 5,
                "missing": 0
            }})
        );
    }

    #[test]
    fn test_date_histogram_intervals() {
        let agg = DateHistogramAgg::calendar("sales_over_time", "date", "1M")
            .format("yyyy-MM-dd")
            .time_zone("-01:00");
        assert_eq!(
            agg.to_value(),
            json!({"date_histogram": {
                "field": "date",
                "calendar_interval": "1M",
                "format": "yyyy-MM-dd",
                "time_zone": "-01:00"
            }})
        );

        let agg = DateHistogramAgg::fixed("sales_over_time", "date", "30d")
            .min_doc_count(0)
            .agg(SumAgg::new("sales", "price"));
        assert_eq!(
            agg.to_value(),
            json!({
                "date_histogram": {
                    "field": "date",
                    "fixed_interval": "30d",
                    "min_doc_count": 0
                },
                "aggs": {"sales": {"sum": {"field": "price"}}}
            })
        );
    }
}
