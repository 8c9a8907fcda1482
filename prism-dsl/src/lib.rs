//! Typed builder for the Elasticsearch query and aggregation DSL
//!
//! Queries and aggregations are built bottom-up from typed nodes and turned
//! into the nested JSON structure the search API expects:
//!
//! ```
//! use prism_dsl::prelude::*;
//!
//! let request = Search::new()
//!     .query(
//!         BoolQuery::new()
//!             .must(TermQuery::new("user", "kimchy"))
//!             .filter(RangeQuery::new("age").gte(10).lte(20)),
//!     )
//!     .agg(SumAgg::new("total_score", "score"))
//!     .size(20);
//!
//! let body = request.to_json().unwrap();
//! assert!(body.contains("\"must\""));
//! ```
//!
//! # Query DSL Support
//!
//! - compound: `bool`, `boosting`, `constant_score`, `dis_max`, `nested`
//! - full text: `match`, `match_bool_prefix`, `match_phrase`,
//!   `match_phrase_prefix`, `multi_match`
//! - term level: `term`, `terms`, `terms_set`, `range`, `prefix`, `fuzzy`,
//!   `regexp`, `wildcard`, `exists`, `ids`
//! - `match_all` / `match_none`
//!
//! Supported aggregations:
//! - metric: `avg`, `sum`, `min`, `max`, `stats`, `value_count`,
//!   `cardinality`, `percentiles`, `string_stats`, `weighted_avg`
//! - bucket: `terms`, `filter`, `nested`, `histogram`, `date_histogram`
//!
//! Anything not modelled can be injected verbatim through
//! [`query::CustomQuery`] and [`aggs::CustomAgg`].

pub mod aggs;
pub mod config;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod node;
pub mod query;
pub mod search;
pub mod transport;
pub mod value;

mod codec;

pub use codec::{decode, Encoder};
pub use config::Config;
pub use error::{Error, Result};
pub use node::{Aggregation, Encode, Node};
pub use value::{Map, Scalar};

/// Everything needed to build and encode a request
pub mod prelude {
    pub use crate::aggs::*;
    pub use crate::highlight::*;
    pub use crate::node::{Aggregation, Encode, Node};
    pub use crate::query::*;
    pub use crate::search::*;
    pub use crate::value::{Map, Scalar};
}
