//! Data model types for decoded server payloads.
//!
//! This module contains the value-level types handed back by the server:
//! - Values (decoded payload variants)
//! - Records (documents, vertices, edges)
//! - Links and binary payloads
//! - Cluster, node and version descriptors

pub mod cluster;
pub mod link;
pub mod record;
pub mod value;
pub mod version;

pub use cluster::{ClusterDescriptor, NodeDescriptor};
pub use link::{BinaryPayload, RecordLink};
pub use record::{Record, RecordMeta};
pub use value::{document_from_json, Document, Value, ValueType};
pub use version::{BuildToken, SemanticVersion};
