//! The capability every query and aggregation node shares

use crate::codec;
use crate::error::Result;
use crate::value::Map;
use serde_json::Value;
use std::fmt::Debug;

/// A buildable clause that turns itself into its JSON object.
///
/// `produce` is pure: calling it twice on the same node yields equal maps.
/// Children are embedded by value, so a node cannot change once a parent
/// owns it. Nodes are `Send + Sync` for sharing finished trees; building
/// them is single-threaded.
pub trait Node: Debug + Send + Sync {
    /// Object rooted at the node's type key, e.g. `{"term": {...}}`
    fn produce(&self) -> Map;
}

/// An aggregation: a node plus the name its container files it under.
///
/// The name never appears in `produce()`; the enclosing aggregation set
/// turns it into the key.
pub trait Aggregation: Node {
    fn name(&self) -> &str;
}

impl<N: Node + ?Sized> Node for Box<N> {
    fn produce(&self) -> Map {
        (**self).produce()
    }
}

impl<A: Aggregation + ?Sized> Aggregation for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Encoding helpers available on every node
pub trait Encode: Node {
    fn to_value(&self) -> Value {
        Value::Object(self.produce())
    }

    /// Compact JSON text
    fn to_json(&self) -> Result<String> {
        codec::to_string(&self.to_value())
    }

    /// Compact JSON bytes, ready to hand to a transport
    fn to_json_vec(&self) -> Result<Vec<u8>> {
        codec::to_vec(&self.to_value())
    }
}

impl<N: Node + ?Sized> Encode for N {}

pub(crate) fn produce_all(nodes: &[Box<dyn Node>]) -> Value {
    Value::Array(nodes.iter().map(|n| Value::Object(n.produce())).collect())
}
