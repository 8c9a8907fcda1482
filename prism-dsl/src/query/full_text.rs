//! Full-text queries: the `match` family and `multi_match`

use crate::node::Node;
use crate::value::{put, put_f32, strings, vocabulary, wrap, Map, Scalar};

vocabulary! {
    /// Boolean logic used to combine analyzed terms
    pub enum Operator ("operator") {
        Or => "or",
        And => "and",
    }
}

vocabulary! {
    /// What to match when the analyzer strips every token
    pub enum ZeroTerms ("zero terms query") {
        None => "none",
        All => "all",
    }
}

vocabulary! {
    /// Execution strategy of a `multi_match` query
    pub enum MultiMatchType ("multi match type") {
        BestFields => "best_fields",
        MostFields => "most_fields",
        CrossFields => "cross_fields",
        Phrase => "phrase",
        PhrasePrefix => "phrase_prefix",
        BoolPrefix => "bool_prefix",
    }
}

vocabulary! {
    /// Which member of the `match` family a [`MatchQuery`] serializes as
    pub enum MatchKind ("match kind") {
        Match => "match",
        BoolPrefix => "match_bool_prefix",
        Phrase => "match_phrase",
        PhrasePrefix => "match_phrase_prefix",
    }
}

/// Options shared by `match` and `multi_match`
#[derive(Debug, Clone, Default)]
struct AnalysisOptions {
    analyzer: Option<String>,
    auto_generate_synonyms_phrase_query: Option<bool>,
    fuzziness: Option<String>,
    max_expansions: Option<u16>,
    prefix_length: Option<u16>,
    transpositions: Option<bool>,
    fuzzy_rewrite: Option<String>,
    lenient: Option<bool>,
    operator: Option<Operator>,
    minimum_should_match: Option<String>,
    zero_terms_query: Option<ZeroTerms>,
    slop: Option<u16>,
}

impl AnalysisOptions {
    fn write(&self, params: &mut Map) {
        put(params, "analyzer", self.analyzer.clone());
        put(
            params,
            "auto_generate_synonyms_phrase_query",
            self.auto_generate_synonyms_phrase_query,
        );
        put(params, "fuzziness", self.fuzziness.clone());
        put(params, "max_expansions", self.max_expansions);
        put(params, "prefix_length", self.prefix_length);
        put(params, "transpositions", self.transpositions);
        put(params, "fuzzy_rewrite", self.fuzzy_rewrite.clone());
        put(params, "lenient", self.lenient);
        put(params, "operator", self.operator);
        put(params, "minimum_should_match", self.minimum_should_match.clone());
        put(params, "zero_terms_query", self.zero_terms_query);
        put(params, "slop", self.slop);
    }
}

/// Generates the option setters shared by both full-text builders
macro_rules! analysis_setters {
    () => {
        pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
            self.options.analyzer = Some(analyzer.into());
            self
        }

        pub fn auto_generate_synonyms_phrase_query(mut self, enabled: bool) -> Self {
            self.options.auto_generate_synonyms_phrase_query = Some(enabled);
            self
        }

        pub fn fuzziness(mut self, fuzziness: impl Into<String>) -> Self {
            self.options.fuzziness = Some(fuzziness.into());
            self
        }

        pub fn max_expansions(mut self, n: u16) -> Self {
            self.options.max_expansions = Some(n);
            self
        }

        pub fn prefix_length(mut self, n: u16) -> Self {
            self.options.prefix_length = Some(n);
            self
        }

        pub fn transpositions(mut self, enabled: bool) -> Self {
            self.options.transpositions = Some(enabled);
            self
        }

        pub fn fuzzy_rewrite(mut self, rewrite: impl Into<String>) -> Self {
            self.options.fuzzy_rewrite = Some(rewrite.into());
            self
        }

        pub fn lenient(mut self, enabled: bool) -> Self {
            self.options.lenient = Some(enabled);
            self
        }

        pub fn operator(mut self, operator: Operator) -> Self {
            self.options.operator = Some(operator);
            self
        }

        /// e.g. `"2"`, `"75%"` or `"3<90%"`
        pub fn minimum_should_match(mut self, spec: impl Into<String>) -> Self {
            self.options.minimum_should_match = Some(spec.into());
            self
        }

        pub fn zero_terms_query(mut self, policy: ZeroTerms) -> Self {
            self.options.zero_terms_query = Some(policy);
            self
        }

        /// Only meaningful for phrase variants
        pub fn slop(mut self, slop: u16) -> Self {
            self.options.slop = Some(slop);
            self
        }
    };
}

// ============================================================================
// Match family
// ============================================================================

#[derive(Debug, Clone)]
pub struct MatchQuery {
    kind: MatchKind,
    field: String,
    query: Scalar,
    options: AnalysisOptions,
}

impl MatchQuery {
    pub fn new(field: impl Into<String>, query: impl Into<Scalar>) -> Self {
        Self::with_kind(MatchKind::Match, field, query)
    }

    pub fn bool_prefix(field: impl Into<String>, query: impl Into<Scalar>) -> Self {
        Self::with_kind(MatchKind::BoolPrefix, field, query)
    }

    pub fn phrase(field: impl Into<String>, query: impl Into<Scalar>) -> Self {
        Self::with_kind(MatchKind::Phrase, field, query)
    }

    pub fn phrase_prefix(field: impl Into<String>, query: impl Into<Scalar>) -> Self {
        Self::with_kind(MatchKind::PhrasePrefix, field, query)
    }

    pub fn with_kind(
        kind: MatchKind,
        field: impl Into<String>,
        query: impl Into<Scalar>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            query: query.into(),
            options: AnalysisOptions::default(),
        }
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    pub fn query(mut self, query: impl Into<Scalar>) -> Self {
        self.query = query.into();
        self
    }

    analysis_setters!();
}

impl Node for MatchQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("query", self.query.to_value());
        self.options.write(&mut params);
        wrap(self.kind.as_str(), wrap(&self.field, params))
    }
}

// ============================================================================
// Multi match
// ============================================================================

#[derive(Debug, Clone)]
pub struct MultiMatchQuery {
    query: Scalar,
    fields: Vec<String>,
    match_type: Option<MultiMatchType>,
    tie_breaker: Option<f32>,
    boost: Option<f32>,
    options: AnalysisOptions,
}

impl MultiMatchQuery {
    pub fn new(query: impl Into<Scalar>) -> Self {
        Self {
            query: query.into(),
            fields: Vec::new(),
            match_type: None,
            tie_breaker: None,
            boost: None,
            options: AnalysisOptions::default(),
        }
    }

    pub fn query(mut self, query: impl Into<Scalar>) -> Self {
        self.query = query.into();
        self
    }

    /// Fields to search, with optional `^boost` suffixes
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn match_type(mut self, match_type: MultiMatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    pub fn tie_breaker(mut self, tie_breaker: f32) -> Self {
        self.tie_breaker = Some(tie_breaker);
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    analysis_setters!();
}

impl Node for MultiMatchQuery {
    fn produce(&self) -> Map {
        let mut params = wrap("query", self.query.to_value());
        if !self.fields.is_empty() {
            params.insert("fields".to_string(), strings(&self.fields));
        }
        put(&mut params, "type", self.match_type);
        put_f32(&mut params, "tie_breaker", self.tie_breaker);
        put_f32(&mut params, "boost", self.boost);
        self.options.write(&mut params);
        wrap("multi_match", params)
    }
}
