//! Boundary to whatever actually talks to the cluster
//!
//! This crate only builds request bodies. Sending them is delegated to a
//! caller-supplied [`SearchTransport`]; response decoding, retries and auth
//! stay on the caller's side.

use crate::error::{BoxError, Error, Result};
use crate::node::{Encode, Node};
use crate::value::vocabulary;
use async_trait::async_trait;

vocabulary! {
    /// Search API endpoint a body is meant for
    pub enum Endpoint ("endpoint") {
        Search => "_search",
        Count => "_count",
    }
}

/// Encoded body plus where it should go
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub endpoint: Endpoint,
    pub indices: Vec<String>,
    pub body: Vec<u8>,
}

impl TransportRequest {
    /// Request path, e.g. `/logs-1,logs-2/_search` or `/_count`
    pub fn path(&self) -> String {
        if self.indices.is_empty() {
            format!("/{}", self.endpoint)
        } else {
            format!("/{}/{}", self.indices.join(","), self.endpoint)
        }
    }
}

/// Sends an encoded request and returns the raw response body.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> std::result::Result<Vec<u8>, BoxError>;
}

/// Encode `body` and hand it to `transport`.
///
/// Transport failures come back as [`Error::Transport`].
pub async fn execute<T>(
    transport: &T,
    endpoint: Endpoint,
    indices: &[&str],
    body: &dyn Node,
) -> Result<Vec<u8>>
where
    T: SearchTransport + ?Sized,
{
    let request = TransportRequest {
        endpoint,
        indices: indices.iter().map(|s| s.to_string()).collect(),
        body: body.to_json_vec()?,
    };
    tracing::debug!(
        path = %request.path(),
        bytes = request.body.len(),
        "Dispatching request"
    );
    transport.send(request).await.map_err(Error::Transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TermQuery;
    use crate::search::QueryRequest;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<TransportRequest>>,
    }

    #[async_trait]
    impl SearchTransport for Recording {
        async fn send(&self, request: TransportRequest) -> std::result::Result<Vec<u8>, BoxError> {
            self.seen.lock().unwrap().push(request);
            Ok(br#"{"took":1}"#.to_vec())
        }
    }

    struct Failing;

    #[async_trait]
    impl SearchTransport for Failing {
        async fn send(&self, _request: TransportRequest) -> std::result::Result<Vec<u8>, BoxError> {
            Err("connection refused".into())
        }
    }

    #[test]
    fn test_path() {
        let mut req = TransportRequest {
            endpoint: Endpoint::Search,
            indices: vec![],
            body: vec![],
        };
        assert_eq!(req.path(), "/_search");
        req.indices = vec!["a".to_string(), "b".to_string()];
        req.endpoint = Endpoint::Count;
        assert_eq!(req.path(), "/a,b/_count");
    }

    #[tokio::test]
    async fn test_execute_forwards_encoded_body() {
        let transport = Recording::default();
        let request = QueryRequest::new(TermQuery::new("user", "kimchy"));

        let response = execute(&transport, Endpoint::Search, &["users"], &request)
            .await
            .unwrap();
        assert_eq!(response, br#"{"took":1}"#.to_vec());

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].indices, vec!["users".to_string()]);
        assert_eq!(
            seen[0].body,
            br#"{"query":{"term":{"user":{"value":"kimchy"}}}}"#.to_vec()
        );
    }

    #[tokio::test]
    async fn test_execute_maps_transport_error() {
        let request = QueryRequest::new(TermQuery::new("user", "kimchy"));
        let err = execute(&Failing, Endpoint::Search, &[], &request)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
