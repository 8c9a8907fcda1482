//! Metric aggregations
//!
//! Each produces `{kind: {"field": .., "missing"?: .., ...}}`.

use crate::node::{Aggregation, Node};
use crate::value::{floats, put, put_scalar, wrap, Map, Scalar};

/// Field plus optional fallback for documents missing it
#[derive(Debug, Clone)]
pub struct FieldSource {
    field: String,
    missing: Option<Scalar>,
}

impl FieldSource {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            missing: None,
        }
    }

    pub fn with_missing(field: impl Into<String>, missing: impl Into<Scalar>) -> Self {
        Self {
            field: field.into(),
            missing: Some(missing.into()),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    fn to_map(&self) -> Map {
        let mut map = wrap("field", self.field.clone());
        put_scalar(&mut map, "missing", self.missing.as_ref());
        map
    }
}

/// Declares a metric aggregation that only takes a field and `missing`
macro_rules! field_metric {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            name: String,
            source: FieldSource,
        }

        impl $name {
            pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    source: FieldSource::new(field),
                }
            }

            pub fn missing(mut self, value: impl Into<Scalar>) -> Self {
                self.source.missing = Some(value.into());
                self
            }
        }

        impl Node for $name {
            fn produce(&self) -> Map {
                wrap($kind, self.source.to_map())
            }
        }

        impl Aggregation for $name {
            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

field_metric!(
    /// Average of a numeric field
    AvgAgg => "avg"
);
field_metric!(
    /// Sum of a numeric field
    SumAgg => "sum"
);
field_metric!(MinAgg => "min");
field_metric!(MaxAgg => "max");
field_metric!(
    /// min, max, sum, count and avg in one go
    StatsAgg => "stats"
);
field_metric!(
    /// Number of values extracted from a field
    ValueCountAgg => "value_count"
);

// ============================================================================
// Cardinality
// ============================================================================

/// Approximate count of distinct values
#[derive(Debug, Clone)]
pub struct CardinalityAgg {
    name: String,
    source: FieldSource,
    precision_threshold: Option<u16>,
}

impl CardinalityAgg {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: FieldSource::new(field),
            precision_threshold: None,
        }
    }

    pub fn missing(mut self, value: impl Into<Scalar>) -> Self {
        self.source.missing = Some(value.into());
        self
    }

    pub fn precision_threshold(mut self, threshold: u16) -> Self {
        self.precision_threshold = Some(threshold);
        self
    }
}

impl Node for CardinalityAgg {
    fn produce(&self) -> Map {
        let mut params = self.source.to_map();
        put(&mut params, "precision_threshold", self.precision_threshold);
        wrap("cardinality", params)
    }
}

impl Aggregation for CardinalityAgg {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Percentiles
// ============================================================================

#[derive(Debug, Clone)]
pub struct PercentilesAgg {
    name: String,
    source: FieldSource,
    percents: Vec<f32>,
    keyed: Option<bool>,
    compression: Option<u16>,
    significant_digits: Option<u8>,
}

impl PercentilesAgg {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: FieldSource::new(field),
            percents: Vec::new(),
            keyed: None,
            compression: None,
            significant_digits: None,
        }
    }

    pub fn percents<I: IntoIterator<Item = f32>>(mut self, percents: I) -> Self {
        self.percents = percents.into_iter().collect();
        self
    }

    pub fn missing(mut self, value: impl Into<Scalar>) -> Self {
        self.source.missing = Some(value.into());
        self
    }

    pub fn keyed(mut self, keyed: bool) -> Self {
        self.keyed = Some(keyed);
        self
    }

    /// TDigest compression
    pub fn compression(mut self, compression: u16) -> Self {
        self.compression = Some(compression);
        self
    }

    /// HDR histogram precision (`number_of_significant_value_digits`)
    pub fn num_histogram_digits(mut self, digits: u8) -> Self {
        self.significant_digits = Some(digits);
        self
    }
}

impl Node for PercentilesAgg {
    fn produce(&self) -> Map {
        let mut params = self.source.to_map();
        if !self.percents.is_empty() {
            params.insert("percents".to_string(), floats(&self.percents));
        }
        put(&mut params, "keyed", self.keyed);
        if let Some(compression) = self.compression {
            params.insert(
                "tdigest".to_string(),
                wrap("compression", compression).into(),
            );
        }
        if let Some(digits) = self.significant_digits {
            params.insert(
                "hdr".to_string(),
                wrap("number_of_significant_value_digits", digits).into(),
            );
        }
        wrap("percentiles", params)
    }
}

impl Aggregation for PercentilesAgg {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// String stats
// ============================================================================

#[derive(Debug, Clone)]
pub struct StringStatsAgg {
    name: String,
    source: FieldSource,
    show_distribution: Option<bool>,
}

impl StringStatsAgg {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: FieldSource::new(field),
            show_distribution: None,
        }
    }

    pub fn missing(mut self, value: impl Into<Scalar>) -> Self {
        self.source.missing = Some(value.into());
        self
    }

    pub fn show_distribution(mut self, show: bool) -> Self {
        self.show_distribution = Some(show);
        self
    }
}

impl Node for StringStatsAgg {
    fn produce(&self) -> Map {
        let mut params = self.source.to_map();
        put(&mut params, "show_distribution", self.show_distribution);
        wrap("string_stats", params)
    }
}

impl Aggregation for StringStatsAgg {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Weighted avg
// ============================================================================

#[derive(Debug, Clone)]
pub struct WeightedAvgAgg {
    name: String,
    value: Option<FieldSource>,
    weight: Option<FieldSource>,
}

impl WeightedAvgAgg {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            weight: None,
        }
    }

    pub fn value(mut self, source: FieldSource) -> Self {
        self.value = Some(source);
        self
    }

    pub fn weight(mut self, source: FieldSource) -> Self {
        self.weight = Some(source);
        self
    }
}

impl Node for WeightedAvgAgg {
    fn produce(&self) -> Map {
        let mut params = Map::new();
        put(&mut params, "value", self.value.as_ref().map(FieldSource::to_map));
        put(&mut params, "weight", self.weight.as_ref().map(FieldSource::to_map));
        wrap("weighted_avg", params)
    }
}

impl Aggregation for WeightedAvgAgg {
    fn name(&self) -> &str {
        &self.name
    }
}
