//! In-memory schema and record model for OrientDB clients.
//!
//! This crate sits between a wire decoder and application code. It does no
//! I/O: it receives already-decoded payloads and hands out typed values, and
//! it lets application code declare schema properties that DDL builders turn
//! into statements.
//!
//! # Overview
//!
//! - **Property descriptors**: per-field constraints (nullability,
//!   uniqueness, indexing, defaults, mutability) with stable declaration order
//! - **Records**: decoded documents, with reserved metadata keys (identity,
//!   version, class) separated from user fields
//! - **Value types**: record links, binary payloads, cluster and node
//!   descriptors, server release versions
//!
//! # Quick Start
//!
//! ```rust
//! use orient_model::{Record, SchemaClass, SchemaRegistry, ScalarType, Value};
//! use orient_model::codec::class_statements;
//! use orient_model::model::document_from_json;
//! use orient_model::validate::validate_record;
//! use serde_json::json;
//!
//! let mut registry = SchemaRegistry::new();
//! let mut person = SchemaClass::new("Person").with_superclass("V");
//! person
//!     .declare("name", registry.property(ScalarType::String).nullable(false).build().unwrap())
//!     .unwrap();
//! assert_eq!(
//!     class_statements(&person).unwrap()[1],
//!     "CREATE PROPERTY Person.name STRING (MANDATORY TRUE, NOTNULL TRUE)"
//! );
//!
//! let payload = match json!({"__rid": "#12:0", "__version": 3, "@Person": {"name": "Ann"}}) {
//!     serde_json::Value::Object(map) => document_from_json(map),
//!     _ => unreachable!(),
//! };
//! let record = Record::try_from(payload).unwrap();
//! assert_eq!(record.rid().unwrap().get(), "12:0");
//! assert_eq!(record.get_field("name").unwrap(), &Value::from("Ann"));
//! assert!(validate_record(&record, &person).is_ok());
//!
//! registry.register(person).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`model`]: Decoded values, records, links and descriptors
//! - [`schema`]: Property descriptors, classes and the declaration registry
//! - [`codec`]: Literal and statement encoding
//! - [`validate`]: Advisory validation of records against classes
//! - [`keys`]: Reserved payload keys and protocol tags
//! - [`error`]: Error types
//!
//! # Threading
//!
//! Everything here is plain data. The only shared state is the declaration
//! counter of a [`SchemaRegistry`]; schemas are expected to be declared from
//! one thread during startup.

pub mod codec;
pub mod error;
pub mod keys;
pub mod model;
pub mod schema;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{encode_default, encode_literal};
pub use error::{
    ContextIntegrityError, DecodeError, Error, MalformedLinkError, NodeDescriptorParseError,
    RecordError, Result, SchemaError, UndefinedFieldError, ValidationError, VersionParseError,
};
pub use model::{
    BinaryPayload, BuildToken, ClusterDescriptor, Document, NodeDescriptor, Record, RecordLink,
    RecordMeta, SemanticVersion, Value, ValueType,
};
pub use schema::{
    Cardinality, DeclarationCounter, DefaultValue, LinkTarget, Property, PropertyBuilder,
    PropertyOptions, PropertyType, ScalarType, SchemaClass, SchemaRegistry,
};
pub use validate::validate_record;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
