//! JSON encoding of produced values

use crate::config::EncodingConfig;
use crate::error::Result;
use crate::node::Node;
use serde_json::Value;

pub(crate) fn to_string(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub(crate) fn to_vec(value: &Value) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec(value)?;
    tracing::trace!(bytes = bytes.len(), "encoded request body");
    Ok(bytes)
}

/// Decode an encoded body back into a generic value
pub fn decode(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encodes nodes according to an [`EncodingConfig`]
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncodingConfig,
}

impl Encoder {
    pub fn new(config: EncodingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncodingConfig {
        &self.config
    }

    pub fn encode(&self, node: &dyn Node) -> Result<Vec<u8>> {
        self.encode_value(&Value::Object(node.produce()))
    }

    pub fn encode_value(&self, value: &Value) -> Result<Vec<u8>> {
        let mut bytes = if self.config.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        if self.config.trailing_newline {
            bytes.push(b'\n');
        }
        tracing::trace!(
            bytes = bytes.len(),
            pretty = self.config.pretty,
            "encoded request body"
        );
        Ok(bytes)
    }

    pub fn encode_to_string(&self, node: &dyn Node) -> Result<String> {
        let value = Value::Object(node.produce());
        let mut text = if self.config.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        if self.config.trailing_newline {
            text.push('\n');
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TermQuery;
    use serde_json::json;

    #[test]
    fn test_default_encoder_is_compact() {
        let encoder = Encoder::default();
        let out = encoder
            .encode_to_string(&TermQuery::new("user", "kimchy"))
            .unwrap();
        assert_eq!(out, r#"{"term":{"user":{"value":"kimchy"}}}"#);
    }

    #[test]
    fn test_trailing_newline() {
        let encoder = Encoder::new(EncodingConfig {
            pretty: false,
            trailing_newline: true,
        });
        let out = encoder.encode(&TermQuery::new("user", "kimchy")).unwrap();
        assert_eq!(out.last(), Some(&b'\n'));
        assert_eq!(decode(&out).unwrap(), json!({"term": {"user": {"value": "kimchy"}}}));
    }

    #[test]
    fn test_pretty_output_decodes_to_same_value() {
        let pretty = Encoder::new(EncodingConfig {
            pretty: true,
            trailing_newline: false,
        });
        let node = TermQuery::new("tag", "tech").boost(1.5);
        let out = pretty.encode(&node).unwrap();
        assert!(out.contains(&b'\n'));
        assert_eq!(
            decode(&out).unwrap(),
            json!({"term": {"tag": {"value": "tech", "boost": 1.5}}})
        );
    }

    #[test]
    fn test_string_output_matches_bytes() {
        let modes = [(false, false), (true, false), (false, true), (true, true)];
        for (pretty, trailing_newline) in modes {
            let encoder = Encoder::new(EncodingConfig {
                pretty,
                trailing_newline,
            });
            let node = TermQuery::new("user", "kimchy").boost(2.0);
            let text = encoder.encode_to_string(&node).unwrap();
            assert_eq!(text.as_bytes(), encoder.encode(&node).unwrap().as_slice());
            assert_eq!(text.ends_with('\n'), trailing_newline);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode(b"{not json").is_err());
    }
}
