//! Query nodes
//!
//! Every type here implements [`Node`](crate::Node) and can be placed inside
//! a combinator or an envelope.

mod compound;
mod custom;
mod full_text;
mod joining;
mod match_all;
mod term_level;

pub use compound::{BoolQuery, BoostingQuery, ConstantScoreQuery, DisMaxQuery, MinimumShouldMatch};
pub use custom::CustomQuery;
pub use full_text::{MatchKind, MatchQuery, MultiMatchQuery, MultiMatchType, Operator, ZeroTerms};
pub use joining::{NestedQuery, ScoreMode};
pub use match_all::MatchAllQuery;
pub use term_level::{
    ExistsQuery, FuzzyQuery, IdsQuery, PrefixQuery, RangeQuery, RangeRelation, RegexpQuery,
    TermQuery, TermsQuery, TermsSetQuery, WildcardQuery,
};
