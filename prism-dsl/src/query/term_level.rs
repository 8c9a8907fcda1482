//! Term-level queries
//!
//! Exact-value queries on structured fields: `term`, `terms`, `terms_set`,
//! `range`, `prefix`, `fuzzy`, `regexp`, `wildcard`, `exists`, `ids`.

use crate::node::Node;
use crate::value::{
    put, put_f32, put_scalar, strings, vocabulary, wrap, Map, Scalar,
};
use serde_json::Value;

/// `{kind: {field: params}}`
fn field_query(kind: &str, field: &str, params: Map) -> Map {
    wrap(kind, wrap(field, params))
}

// ============================================================================
// Exists
// ============================================================================

#[derive(Debug, Clone)]
pub struct ExistsQuery {
    field: String,
}

impl ExistsQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Node for ExistsQuery {
    fn produce(&self) -> Map {
        wrap("exists", wrap("field", self.field.clone()))
    }
}

// ============================================================================
// IDs
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct IdsQuery {
    values: Vec<String>,
}

impl IdsQuery {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl Node for IdsQuery {
    fn produce(&self) -> Map {
        wrap("ids", wrap("values", strings(&self.values)))
    }
}

// ============================================================================
// Prefix
// ============================================================================

#[derive(Debug, Clone)]
pub struct PrefixQuery {
    field: String,
    value: String,
    rewrite: Option<String>,
    case_insensitive: Option<bool>,
}

impl PrefixQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            rewrite: None,
            case_insensitive: None,
        }
    }

    pub fn rewrite(mut self, rewrite: impl Into<String>) -> Self {
        self.rewrite = Some(rewrite.into());
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = Some(enabled);
        self
    }
}

impl Node for PrefixQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("value", self.value.clone());
        put(&mut params, "rewrite", self.rewrite.clone());
        put(&mut params, "case_insensitive", self.case_insensitive);
        field_query("prefix", &self.field, params)
    }
}

// ============================================================================
// Range
// ============================================================================

vocabulary! {
    /// How a range query matches range-typed fields
    pub enum RangeRelation ("range relation") {
        Intersects => "INTERSECTS",
        Contains => "CONTAINS",
        Within => "WITHIN",
    }
}

#[derive(Debug, Clone)]
pub struct RangeQuery {
    field: String,
    gt: Option<Scalar>,
    gte: Option<Scalar>,
    lt: Option<Scalar>,
    lte: Option<Scalar>,
    format: Option<String>,
    relation: Option<RangeRelation>,
    time_zone: Option<String>,
    boost: Option<f32>,
}

impl RangeQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            gt: None,
            gte: None,
            lt: None,
            lte: None,
            format: None,
            relation: None,
            time_zone: None,
            boost: None,
        }
    }

    pub fn gt(mut self, value: impl Into<Scalar>) -> Self {
        self.gt = Some(value.into());
        self
    }

    pub fn gte(mut self, value: impl Into<Scalar>) -> Self {
        self.gte = Some(value.into());
        self
    }

    pub fn lt(mut self, value: impl Into<Scalar>) -> Self {
        self.lt = Some(value.into());
        self
    }

    pub fn lte(mut self, value: impl Into<Scalar>) -> Self {
        self.lte = Some(value.into());
        self
    }

    /// Date format used to parse date bounds
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn relation(mut self, relation: RangeRelation) -> Self {
        self.relation = Some(relation);
        self
    }

    pub fn time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = Some(zone.into());
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Node for RangeQuery {
    fn produce(&self) -> Map {
        let mut params = Map::new();
        put_scalar(&mut params, "gt", self.gt.as_ref());
        put_scalar(&mut params, "gte", self.gte.as_ref());
        put_scalar(&mut params, "lt", self.lt.as_ref());
        put_scalar(&mut params, "lte", self.lte.as_ref());
        put(&mut params, "format", self.format.clone());
        put(&mut params, "relation", self.relation);
        put(&mut params, "time_zone", self.time_zone.clone());
        put_f32(&mut params, "boost", self.boost);
        field_query("range", &self.field, params)
    }
}

// ============================================================================
// Regexp
// ============================================================================

#[derive(Debug, Clone)]
pub struct RegexpQuery {
    field: String,
    value: String,
    flags: Option<String>,
    max_determinized_states: Option<u16>,
    rewrite: Option<String>,
    case_insensitive: Option<bool>,
}

impl RegexpQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            flags: None,
            max_determinized_states: None,
            rewrite: None,
            case_insensitive: None,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Enabled operators, e.g. `ALL` or `COMPLEMENT|INTERVAL`
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    pub fn max_determinized_states(mut self, states: u16) -> Self {
        self.max_determinized_states = Some(states);
        self
    }

    pub fn rewrite(mut self, rewrite: impl Into<String>) -> Self {
        self.rewrite = Some(rewrite.into());
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = Some(enabled);
        self
    }
}

impl Node for RegexpQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("value", self.value.clone());
        put(&mut params, "flags", self.flags.clone());
        put(&mut params, "max_determinized_states", self.max_determinized_states);
        put(&mut params, "rewrite", self.rewrite.clone());
        put(&mut params, "case_insensitive", self.case_insensitive);
        field_query("regexp", &self.field, params)
    }
}

// ============================================================================
// Wildcard
// ============================================================================

#[derive(Debug, Clone)]
pub struct WildcardQuery {
    field: String,
    value: String,
    rewrite: Option<String>,
    boost: Option<f32>,
    case_insensitive: Option<bool>,
}

impl WildcardQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            rewrite: None,
            boost: None,
            case_insensitive: None,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn rewrite(mut self, rewrite: impl Into<String>) -> Self {
        self.rewrite = Some(rewrite.into());
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = Some(enabled);
        self
    }
}

impl Node for WildcardQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("value", self.value.clone());
        put(&mut params, "rewrite", self.rewrite.clone());
        put_f32(&mut params, "boost", self.boost);
        put(&mut params, "case_insensitive", self.case_insensitive);
        field_query("wildcard", &self.field, params)
    }
}

// ============================================================================
// Fuzzy
// ============================================================================

#[derive(Debug, Clone)]
pub struct FuzzyQuery {
    field: String,
    value: String,
    fuzziness: Option<String>,
    max_expansions: Option<u16>,
    prefix_length: Option<u16>,
    transpositions: Option<bool>,
    rewrite: Option<String>,
}

impl FuzzyQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            fuzziness: None,
            max_expansions: None,
            prefix_length: None,
            transpositions: None,
            rewrite: None,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Maximum edit distance, e.g. `AUTO` or `2`
    pub fn fuzziness(mut self, fuzziness: impl Into<String>) -> Self {
        self.fuzziness = Some(fuzziness.into());
        self
    }

    pub fn max_expansions(mut self, n: u16) -> Self {
        self.max_expansions = Some(n);
        self
    }

    pub fn prefix_length(mut self, n: u16) -> Self {
        self.prefix_length = Some(n);
        self
    }

    pub fn transpositions(mut self, enabled: bool) -> Self {
        self.transpositions = Some(enabled);
        self
    }

    pub fn rewrite(mut self, rewrite: impl Into<String>) -> Self {
        self.rewrite = Some(rewrite.into());
        self
    }
}

impl Node for FuzzyQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("value", self.value.clone());
        put(&mut params, "fuzziness", self.fuzziness.clone());
        put(&mut params, "max_expansions", self.max_expansions);
        put(&mut params, "prefix_length", self.prefix_length);
        put(&mut params, "transpositions", self.transpositions);
        put(&mut params, "rewrite", self.rewrite.clone());
        field_query("fuzzy", &self.field, params)
    }
}

// ============================================================================
// Term
// ============================================================================

#[derive(Debug, Clone)]
pub struct TermQuery {
    field: String,
    value: Scalar,
    boost: Option<f32>,
    case_insensitive: Option<bool>,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            boost: None,
            case_insensitive: None,
        }
    }

    pub fn value(mut self, value: impl Into<Scalar>) -> Self {
        self.value = value.into();
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = Some(enabled);
        self
    }
}

impl Node for TermQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("value", self.value.to_value());
        put_f32(&mut params, "boost", self.boost);
        put(&mut params, "case_insensitive", self.case_insensitive);
        field_query("term", &self.field, params)
    }
}

// ============================================================================
// Terms
// ============================================================================

#[derive(Debug, Clone)]
pub struct TermsQuery {
    field: String,
    values: Vec<Scalar>,
    boost: Option<f32>,
}

impl TermsQuery {
    pub fn new<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            boost: None,
        }
    }

    /// Replace the value list
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Not emitted when the field itself is named `boost`
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Node for TermsQuery {
    fn produce(&self) -> Map {
        let values = Value::Array(self.values.iter().map(Scalar::to_value).collect());
        let mut inner = wrap(&self.field, values);
        // field and boost share one object; the value list wins
        if self.field != "boost" {
            put_f32(&mut inner, "boost", self.boost);
        }
        wrap("terms", inner)
    }
}

// ============================================================================
// Terms set
// ============================================================================

#[derive(Debug, Clone)]
pub struct TermsSetQuery {
    field: String,
    terms: Vec<String>,
    minimum_should_match_field: Option<String>,
    minimum_should_match_script: Option<String>,
}

impl TermsSetQuery {
    pub fn new<I, S>(field: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            terms: terms.into_iter().map(Into::into).collect(),
            minimum_should_match_field: None,
            minimum_should_match_script: None,
        }
    }

    pub fn terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Numeric field holding the number of terms that must match
    pub fn minimum_should_match_field(mut self, field: impl Into<String>) -> Self {
        self.minimum_should_match_field = Some(field.into());
        self
    }

    pub fn minimum_should_match_script(mut self, script: impl Into<String>) -> Self {
        self.minimum_should_match_script = Some(script.into());
        self
    }
}

impl Node for TermsSetQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("terms", strings(&self.terms));
        put(
            &mut params,
            "minimum_should_match_field",
            self.minimum_should_match_field.clone(),
        );
        put(
            &mut params,
            "minimum_should_match_script",
            self.minimum_should_match_script.clone(),
        );
        field_query("terms_set", &self.field, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Encode;
    use serde_json::json;

    #[test]
    fn test_exists() {
        assert_eq!(
            ExistsQuery::new("title").to_value(),
            json!({"exists": {"field": "title"}})
        );
    }

    #[test]
    fn test_required_fields_only() {
        assert_eq!(
            RegexpQuery::new("user", "k.*y").to_value(),
            json!({"regexp": {"user": {"value": "k.*y"}}})
        );
        assert_eq!(
            WildcardQuery::new("user", "ki*y").to_value(),
            json!({"wildcard": {"user": {"value": "ki*y"}}})
        );
        assert_eq!(
            TermsQuery::new("user", ["kimchy"]).to_value(),
            json!({"terms": {"user": ["kimchy"]}})
        );
        assert_eq!(
            TermsSetQuery::new("programming_languages", ["c++", "java"]).to_value(),
            json!({"terms_set": {"programming_languages": {"terms": ["c++", "java"]}}})
        );
    }

    #[test]
    fn test_terms_field_named_boost_keeps_values() {
        let q = TermsQuery::new("boost", ["a"]).boost(1.5);
        assert_eq!(q.to_value(), json!({"terms": {"boost": ["a"]}}));
    }

    #[test]
    fn test_ids() {
        assert_eq!(
            IdsQuery::new(["1", "4", "100"]).to_value(),
            json!({"ids": {"values": ["1", "4", "100"]}})
        );
    }

    #[test]
    fn test_prefix_simple_and_complex() {
        assert_eq!(
            PrefixQuery::new("user", "ki").to_value(),
            json!({"prefix": {"user": {"value": "ki"}}})
        );
        assert_eq!(
            PrefixQuery::new("user", "ki").rewrite("ji").to_value(),
            json!({"prefix": {"user": {"value": "ki", "rewrite": "ji"}}})
        );
    }

    #[test]
    fn test_int_range() {
        let q = RangeQuery::new("age").gte(10).lte(20).boost(2.0);
        assert_eq!(
            q.to_value(),
            json!({"range": {"age": {"gte": 10, "lte": 20, "boost": 2}}})
        );
    }

    #[test]
    fn test_string_range_with_relation() {
        let q = RangeQuery::new("timestamp")
            .gte("now-1d/d")
            .lt("now/d")
            .relation(RangeRelation::Contains);
        assert_eq!(
            q.to_value(),
            json!({"range": {"timestamp": {
                "gte": "now-1d/d",
                "lt": "now/d",
                "relation": "CONTAINS"
            }}})
        );
    }

    #[test]
    fn test_range_without_bounds() {
        assert_eq!(
            RangeQuery::new("age").to_value(),
            json!({"range": {"age": {}}})
        );
    }

    #[test]
    fn test_explicit_default_relation_is_kept() {
        let q = RangeQuery::new("span").relation(RangeRelation::Intersects);
        assert_eq!(
            q.to_value(),
            json!({"range": {"span": {"relation": "INTERSECTS"}}})
        );
    }

    #[test]
    fn test_regexp() {
        let q = RegexpQuery::new("user", "k.*y")
            .flags("ALL")
            .max_determinized_states(10000)
            .rewrite("constant_score");
        assert_eq!(
            q.to_value(),
            json!({"regexp": {"user": {
                "value": "k.*y",
                "flags": "ALL",
                "max_determinized_states": 10000,
                "rewrite": "constant_score"
            }}})
        );
    }

    #[test]
    fn test_wildcard() {
        let q = WildcardQuery::new("user", "ki*y").rewrite("constant_score");
        assert_eq!(
            q.to_value(),
            json!({"wildcard": {"user": {"value": "ki*y", "rewrite": "constant_score"}}})
        );
    }

    #[test]
    fn test_fuzzy() {
        let q = FuzzyQuery::new("user", "ki")
            .fuzziness("AUTO")
            .max_expansions(50)
            .transpositions(true);
        assert_eq!(
            q.to_value(),
            json!({"fuzzy": {"user": {
                "value": "ki",
                "fuzziness": "AUTO",
                "max_expansions": 50,
                "transpositions": true
            }}})
        );
    }

    #[test]
    fn test_fuzzy_transpositions_false_is_emitted() {
        let q = FuzzyQuery::new("user", "ki").transpositions(false);
        assert_eq!(
            q.to_value(),
            json!({"fuzzy": {"user": {"value": "ki", "transpositions": false}}})
        );
    }

    #[test]
    fn test_term() {
        assert_eq!(
            TermQuery::new("user", "kimchy").to_value(),
            json!({"term": {"user": {"value": "kimchy"}}})
        );
        assert_eq!(
            TermQuery::new("user", "Kimchy").boost(1.3).to_value(),
            json!({"term": {"user": {"value": "Kimchy", "boost": 1.3}}})
        );
    }

    #[test]
    fn test_term_boost_zero_is_kept() {
        assert_eq!(
            TermQuery::new("user", "kimchy").boost(0.0).to_value(),
            json!({"term": {"user": {"value": "kimchy", "boost": 0}}})
        );
    }

    #[test]
    fn test_term_value_types() {
        assert_eq!(
            TermQuery::new("active", true).to_value(),
            json!({"term": {"active": {"value": true}}})
        );
        assert_eq!(
            TermQuery::new("count", 7).value(8).to_value(),
            json!({"term": {"count": {"value": 8}}})
        );
    }

    #[test]
    fn test_terms() {
        let q = TermsQuery::new("user", Vec::<Scalar>::new())
            .values(["bla", "pl"])
            .boost(1.3);
        assert_eq!(
            q.to_value(),
            json!({"terms": {"user": ["bla", "pl"], "boost": 1.3}})
        );
    }

    #[test]
    fn test_terms_set() {
        let q = TermsSetQuery::new("programming_languages", ["go", "rust", "COBOL"])
            .minimum_should_match_field("required_matches");
        assert_eq!(
            q.to_value(),
            json!({"terms_set": {"programming_languages": {
                "terms": ["go", "rust", "COBOL"],
                "minimum_should_match_field": "required_matches"
            }}})
        );
    }

    #[test]
    fn test_range_relation_parse() {
        assert_eq!(
            "WITHIN".parse::<RangeRelation>().unwrap(),
            RangeRelation::Within
        );
        assert!("within".parse::<RangeRelation>().is_err());
    }
}
