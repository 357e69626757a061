//! Decoded payload values.
//!
//! The wire layer hands this crate already-decoded payloads: mappings of
//! string keys to the variants of [`Value`].

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;

use crate::model::{BinaryPayload, RecordLink};

/// A decoded mapping from field name to value.
///
/// Sorted so that rendering is deterministic; key order carries no meaning.
pub type Document = BTreeMap<String, Value>;

/// Type tag for a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Float,
    Decimal,
    String,
    Bytes,
    Link,
    Binary,
    List,
    Map,
}

impl ValueType {
    /// Lowercase name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "boolean",
            ValueType::Int => "integer",
            ValueType::Float => "float",
            ValueType::Decimal => "decimal",
            ValueType::String => "string",
            ValueType::Bytes => "bytes",
            ValueType::Link => "link",
            ValueType::Binary => "binary",
            ValueType::List => "list",
            ValueType::Map => "map",
        }
    }
}

/// A single decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Arbitrary-precision decimal.
    Decimal(BigDecimal),
    String(String),
    Bytes(Vec<u8>),
    /// Reference to another record.
    Link(RecordLink),
    /// Opaque base64 payload (e.g. a serialized RidBag).
    Binary(BinaryPayload),
    List(Vec<Value>),
    Map(Document),
}

impl Value {
    /// Returns the type tag of this value.
    pub fn data_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Decimal(_) => ValueType::Decimal,
            Value::String(_) => ValueType::String,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Link(_) => ValueType::Link,
            Value::Binary(_) => ValueType::Binary,
            Value::List(_) => ValueType::List,
            Value::Map(_) => ValueType::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of integer and float values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&RecordLink> {
        match self {
            Value::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Document> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Takes the mapping out of a `Map` value, handing the value back otherwise.
    pub fn into_map(self) -> Result<Document, Value> {
        match self {
            Value::Map(map) => Ok(map),
            other => Err(other),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<RecordLink> for Value {
    fn from(v: RecordLink) -> Self {
        Value::Link(v)
    }
}

impl From<BinaryPayload> for Value {
    fn from(v: BinaryPayload) -> Self {
        Value::Binary(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    // Beyond i64 range; kept exact
                    Value::Decimal(BigDecimal::from(u))
                } else {
                    n.as_f64().map_or(Value::Null, Value::Float)
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(document_from_json(map)),
        }
    }
}

/// Converts a JSON object into a [`Document`].
pub fn document_from_json(map: serde_json::Map<String, serde_json::Value>) -> Document {
    map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
}
