//! Decoded database records.
//!
//! A [`Record`] separates the reserved metadata keys of a payload (identity,
//! version, class, storage wrapper, class shorthand) from ordinary fields.

use std::fmt;

use tracing::debug;

use crate::codec::encode_document;
use crate::error::{RecordError, UndefinedFieldError};
use crate::keys;
use crate::model::{Document, RecordLink, Value};

/// Metadata accepted by [`Record::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordMeta {
    pub rid: Option<RecordLink>,
    pub version: Option<i64>,
    pub class: Option<String>,
}

/// One decoded database record.
///
/// ```rust
/// use orient_model::{Record, Value};
/// use orient_model::model::document_from_json;
/// use serde_json::json;
///
/// let payload = match json!({"@Person": {"name": "Ann"}}) {
///     serde_json::Value::Object(map) => document_from_json(map),
///     _ => unreachable!(),
/// };
/// let record = Record::try_from(payload).unwrap();
/// assert_eq!(record.class_name(), Some("Person"));
/// assert_eq!(record.get_field("name").unwrap(), &Value::from("Ann"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    rid: Option<RecordLink>,
    version: Option<i64>,
    class: Option<String>,
    fields: Document,
}

impl Record {
    /// Builds a record from a decoded payload; an absent payload gives an empty record.
    ///
    /// The storage wrapper is applied before any other key, and the explicit
    /// class key takes precedence over the class shorthand, so the result does
    /// not depend on the order keys arrive in. Reserved keys nested inside the
    /// storage wrapper or a class shorthand are dropped, never kept as fields.
    pub fn from_payload(payload: Option<Document>) -> Result<Self, RecordError> {
        let mut payload = payload.unwrap_or_default();
        let mut record = Record::default();

        if let Some(storage) = payload.remove(keys::STORAGE) {
            let entries = storage.into_map().map_err(|_| RecordError::MalformedReserved {
                key: keys::STORAGE.to_string(),
                expected: "a mapping",
            })?;
            merge_fields(&mut record.fields, entries);
        }

        let mut shorthand_class = None;
        for (key, value) in payload {
            match key.as_str() {
                keys::RID => record.rid = parse_rid(value)?,
                keys::VERSION => record.version = parse_version(value)?,
                keys::CLASS => record.class = parse_class(value)?,
                _ => match keys::shorthand_class(&key) {
                    Some(class) => {
                        let entries = value.into_map().map_err(|_| RecordError::MalformedReserved {
                            key: key.clone(),
                            expected: "a mapping",
                        })?;
                        merge_fields(&mut record.fields, entries);
                        shorthand_class = Some(class.to_string());
                    }
                    None => {
                        record.fields.insert(key, value);
                    }
                },
            }
        }

        if let Some(shorthand) = shorthand_class {
            match record.class.as_deref() {
                None => record.class = Some(shorthand),
                Some(class) if class != shorthand => {
                    debug!(class, shorthand = %shorthand, "explicit class key overrides class shorthand");
                }
                Some(_) => {}
            }
        }

        Ok(record)
    }

    /// The record identity.
    pub fn rid(&self) -> Option<&RecordLink> {
        self.rid.as_ref()
    }

    pub fn version(&self) -> Option<i64> {
        self.version
    }

    /// The owning class name.
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Reads a field; fails if the record does not carry it.
    pub fn get_field(&self, name: &str) -> Result<&Value, UndefinedFieldError> {
        self.fields.get(name).ok_or_else(|| UndefinedFieldError {
            field: name.to_string(),
        })
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Incoming vertex of an edge record.
    pub fn in_vertex(&self) -> Option<&Value> {
        self.fields.get(keys::EDGE_IN)
    }

    /// Outgoing vertex of an edge record.
    pub fn out_vertex(&self) -> Option<&Value> {
        self.fields.get(keys::EDGE_OUT)
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Document {
        self.fields
    }

    /// Refreshes metadata after a write.
    ///
    /// Identity and version are overwritten even when absent; the class is
    /// only set if the record has none yet. Fields are untouched.
    pub fn update(&mut self, meta: RecordMeta) {
        self.rid = meta.rid;
        self.version = meta.version;
        if self.class.is_none() {
            self.class = meta.class;
        }
    }
}

impl TryFrom<Document> for Record {
    type Error = RecordError;

    fn try_from(payload: Document) -> Result<Self, Self::Error> {
        Self::from_payload(Some(payload))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        if let Some(class) = &self.class {
            write!(f, "'@{class}':")?;
        }
        f.write_str(&encode_document(&self.fields))?;
        if let Some(version) = self.version {
            write!(f, ",'version':{version}")?;
        }
        if let Some(rid) = &self.rid {
            write!(f, ",'rid':'{rid}'")?;
        }
        f.write_str("}")
    }
}

fn merge_fields(fields: &mut Document, entries: Document) {
    for (key, value) in entries {
        if keys::is_reserved(&key) {
            debug!(key = %key, "dropping nested reserved key");
            continue;
        }
        fields.insert(key, value);
    }
}

fn parse_rid(value: Value) -> Result<Option<RecordLink>, RecordError> {
    match value {
        Value::Null => Ok(None),
        Value::Link(link) => Ok(Some(link)),
        Value::String(s) => Ok(Some(RecordLink::from_rid(&s)?)),
        _ => Err(RecordError::MalformedReserved {
            key: keys::RID.to_string(),
            expected: "a record id",
        }),
    }
}

fn parse_version(value: Value) -> Result<Option<i64>, RecordError> {
    match value {
        Value::Null => Ok(None),
        Value::Int(v) => Ok(Some(v)),
        _ => Err(RecordError::MalformedReserved {
            key: keys::VERSION.to_string(),
            expected: "an integer",
        }),
    }
}

fn parse_class(value: Value) -> Result<Option<String>, RecordError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(RecordError::MalformedReserved {
            key: keys::CLASS.to_string(),
            expected: "a class name",
        }),
    }
}
