//! Cluster and server node descriptors.

use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::warn;

use crate::codec::encode_literal;
use crate::error::NodeDescriptorParseError;
use crate::keys;
use crate::model::{Document, Value};

/// A physical storage partition on the server.
///
/// Equality and hashing consider only `name` and `id`.
#[derive(Debug, Clone)]
pub struct ClusterDescriptor {
    pub name: String,
    pub id: i32,
    /// Cluster type (only sent by older protocol versions).
    pub cluster_type: Option<String>,
    /// Data segment (only sent by older protocol versions).
    pub segment: Option<i32>,
}

impl ClusterDescriptor {
    pub fn new(name: impl Into<String>, id: i32) -> Self {
        Self {
            name: name.into(),
            id,
            cluster_type: None,
            segment: None,
        }
    }

    /// Sets the legacy type and segment fields.
    pub fn with_legacy(mut self, cluster_type: impl Into<String>, segment: i32) -> Self {
        self.cluster_type = Some(cluster_type.into());
        self.segment = Some(segment);
        self
    }
}

impl PartialEq for ClusterDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.id == other.id
    }
}

impl Eq for ClusterDescriptor {}

impl Hash for ClusterDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.id.hash(state);
    }
}

impl fmt::Display for ClusterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.id)
    }
}

/// A server node in a distributed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDescriptor {
    pub id: Value,
    /// Node name as sent by the server; usually a string.
    pub name: Value,
    pub started_on: Value,
    /// Host of the binary protocol listener.
    pub host: Option<String>,
    /// Port of the binary protocol listener.
    pub port: Option<u16>,
}

impl NodeDescriptor {
    /// Reads a node from a configuration document (`db_open`/`db_reload` responses).
    ///
    /// Only the absence of `id`, `name`, `startedOn` or `listeners` fails.
    /// The host and port come from the first listener whose protocol is the
    /// binary protocol; without one (or when `listeners` is not a list) they
    /// stay unset.
    pub fn from_document(doc: &Document) -> Result<Self, NodeDescriptorParseError> {
        let id = required(doc, keys::NODE_ID)?.clone();
        let name = required(doc, keys::NODE_NAME)?.clone();
        let started_on = required(doc, keys::NODE_STARTED_ON)?.clone();
        let listeners = match required(doc, keys::NODE_LISTENERS)? {
            Value::List(listeners) => listeners.as_slice(),
            other => {
                warn!(node = %display_name(&name), found = other.data_type().name(), "node listeners are not a list");
                &[][..]
            }
        };

        let listen = listeners
            .iter()
            .filter_map(Value::as_map)
            .find(|l| {
                l.get(keys::LISTENER_PROTOCOL).and_then(Value::as_str) == Some(keys::BINARY_PROTOCOL)
            })
            .and_then(|l| l.get(keys::LISTENER_LISTEN))
            .and_then(Value::as_str);

        let (host, port) = match listen {
            Some(listen) => split_listen(&display_name(&name), listen),
            None => (None, None),
        };

        Ok(Self {
            id,
            name,
            started_on,
            host,
            port,
        })
    }

    /// Address of the binary listener as `host:port`, when both are known.
    pub fn binary_address(&self) -> Option<String> {
        match (&self.host, self.port) {
            (Some(host), Some(port)) => Some(format!("{host}:{port}")),
            _ => None,
        }
    }
}

impl TryFrom<&Document> for NodeDescriptor {
    type Error = NodeDescriptorParseError;

    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        Self::from_document(doc)
    }
}

impl fmt::Display for NodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_name(&self.name))
    }
}

fn display_name(name: &Value) -> String {
    match name {
        Value::String(s) => s.clone(),
        other => encode_literal(other),
    }
}

fn required<'a>(doc: &'a Document, key: &'static str) -> Result<&'a Value, NodeDescriptorParseError> {
    doc.get(key).ok_or(NodeDescriptorParseError::MissingKey { key })
}

fn split_listen(node: &str, listen: &str) -> (Option<String>, Option<u16>) {
    let mut parts = listen.split(':');
    let host = parts.next().map(str::to_string);
    let port = parts.next().and_then(|p| match p.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!(node, listen, "unparsable binary listener port");
            None
        }
    });
    (host, port)
}
