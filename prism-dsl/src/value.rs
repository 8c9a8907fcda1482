//! Value representation shared by every node
//!
//! Nodes produce a [`Map`] (a `serde_json` object). Caller-supplied values of
//! open type (term values, range bounds, `missing` fallbacks) go through the
//! closed [`Scalar`] type so encoding stays total.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON object produced by a node
pub type Map = serde_json::Map<String, Value>;

/// Scalar value accepted wherever the search API takes "any" value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl Scalar {
    pub fn to_value(&self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::from(*i),
            Scalar::UInt(u) => Value::from(*u),
            Scalar::Float(f) => number(*f),
            Scalar::Str(s) => Value::String(s.clone()),
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        scalar.to_value()
    }
}

impl From<&Scalar> for Value {
    fn from(scalar: &Scalar) -> Self {
        scalar.to_value()
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl From<&String> for Scalar {
    fn from(v: &String) -> Self {
        Scalar::Str(v.clone())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(widen_f32(v))
    }
}

macro_rules! scalar_from_int {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Scalar {
                fn from(v: $t) -> Self {
                    Scalar::$variant(v as $target)
                }
            }
        )+
    };
}

scalar_from_int!(Int as i64: i8, i16, i32, i64, isize, u8, u16, u32);
scalar_from_int!(UInt as u64: u64, usize);

/// Widen an `f32` through its shortest decimal form, so `1.3f32` becomes
/// `1.3` and not `1.2999999523162842`.
pub fn widen_f32(v: f32) -> f64 {
    v.to_string().parse().unwrap_or(f64::from(v))
}

/// JSON number for a float. Whole values are written as integers, so `2.0`
/// encodes as `2`; non-finite values map to `null`.
pub(crate) fn number(v: f64) -> Value {
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Value::from(v as i64)
    } else {
        Value::from(v)
    }
}

/// JSON number for a 32-bit float, widened through its shortest decimal form
pub(crate) fn float(v: f32) -> Value {
    number(widen_f32(v))
}

pub(crate) fn floats(values: &[f32]) -> Value {
    Value::Array(values.iter().map(|v| float(*v)).collect())
}

pub(crate) fn strings(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

/// Insert `key` only when the option is set.
pub(crate) fn put<V: Into<Value>>(map: &mut Map, key: &str, value: Option<V>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.into());
    }
}

pub(crate) fn put_f32(map: &mut Map, key: &str, value: Option<f32>) {
    if let Some(v) = value {
        map.insert(key.to_string(), float(v));
    }
}

pub(crate) fn put_scalar(map: &mut Map, key: &str, value: Option<&Scalar>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.to_value());
    }
}

/// `{key: inner}`
pub(crate) fn wrap(key: &str, inner: impl Into<Value>) -> Map {
    let mut map = Map::new();
    map.insert(key.to_string(), inner.into());
    map
}

/// Declares a closed vocabulary: an exhaustive enum, its wire literals as a
/// static table, and parsing that rejects anything outside the table.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant with its wire literal
            pub const TABLE: &'static [($name, &'static str)] = &[ $( ($name::$variant, $text) ),+ ];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $name::TABLE
                    .iter()
                    .find(|(_, text)| *text == s)
                    .map(|(variant, _)| *variant)
                    .ok_or_else(|| $crate::error::Error::InvalidEnumValue {
                        vocabulary: $label,
                        value: s.to_string(),
                    })
            }
        }

        impl From<$name> for serde_json::Value {
            fn from(v: $name) -> Self {
                serde_json::Value::String(v.as_str().to_string())
            }
        }
    };
}

pub(crate) use vocabulary;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    vocabulary! {
        enum Color ("color") {
            Red => "red",
            DarkBlue => "DARK_BLUE",
        }
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Scalar::from("kimchy").to_value(), json!("kimchy"));
        assert_eq!(Scalar::from(10).to_value(), json!(10));
        assert_eq!(Scalar::from(10u64).to_value(), json!(10));
        assert_eq!(Scalar::from(true).to_value(), json!(true));
        assert_eq!(Scalar::from(2.5).to_value(), json!(2.5));
        assert_eq!(Scalar::from(-3i8), Scalar::Int(-3));
    }

    #[test]
    fn test_widen_f32_keeps_short_form() {
        assert_eq!(widen_f32(1.3), 1.3);
        assert_eq!(widen_f32(2.0), 2.0);
        assert_eq!(float(0.3), json!(0.3));
        assert_eq!(Scalar::from(99.9f32).to_value(), json!(99.9));
    }

    #[test]
    fn test_whole_floats_encode_as_integers() {
        assert_eq!(float(2.0), json!(2));
        assert_eq!(float(-3.0), json!(-3));
        assert_eq!(float(0.0), json!(0));
        assert_eq!(float(2.5), json!(2.5));
        assert_eq!(Scalar::from(10.0).to_value(), json!(10));
        assert_eq!(serde_json::to_string(&float(2.0)).unwrap(), "2");
        assert_eq!(number(1e300), Value::from(1e300));
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert_eq!(float(f32::NAN), Value::Null);
        assert_eq!(float(f32::INFINITY), Value::Null);
    }

    #[test]
    fn test_put_skips_none() {
        let mut map = Map::new();
        put::<u16>(&mut map, "size", None);
        put_f32(&mut map, "boost", None);
        put_scalar(&mut map, "missing", None);
        assert!(map.is_empty());

        put(&mut map, "size", Some(0u16));
        put_f32(&mut map, "boost", Some(0.0));
        assert_eq!(Value::Object(map), json!({"size": 0, "boost": 0}));
    }

    #[test]
    fn test_vocabulary_table_and_parse() {
        assert_eq!(Color::Red.as_str(), "red");
        assert_eq!(Color::DarkBlue.to_string(), "DARK_BLUE");
        assert_eq!(Color::TABLE.len(), 2);
        assert_eq!("DARK_BLUE".parse::<Color>().unwrap(), Color::DarkBlue);
        assert_eq!(Value::from(Color::Red), json!("red"));
    }

    #[test]
    fn test_vocabulary_rejects_unknown() {
        let err = "purple".parse::<Color>().unwrap_err();
        match err {
            crate::Error::InvalidEnumValue { vocabulary, value } => {
                assert_eq!(vocabulary, "color");
                assert_eq!(value, "purple");
            }
            other => panic!("Expected InvalidEnumValue, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_deserialize_untagged() {
        let s: Scalar = serde_json::from_value(json!("x")).unwrap();
        assert_eq!(s, Scalar::Str("x".to_string()));
        let n: Scalar = serde_json::from_value(json!(-4)).unwrap();
        assert_eq!(n, Scalar::Int(-4));
    }
}
