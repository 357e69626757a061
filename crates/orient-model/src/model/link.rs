//! Record links and opaque binary payloads.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{DecodeError, MalformedLinkError};

/// A reference to another record, `"<clusterId>:<recordPosition>"`.
///
/// Both parts are kept verbatim; they are not required to be numeric here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordLink {
    link: String,
    split: usize,
}

impl RecordLink {
    /// Parses a `cluster:position` pair.
    pub fn parse(input: &str) -> Result<Self, MalformedLinkError> {
        let separators = input.matches(':').count();
        match input.find(':') {
            Some(split) if separators == 1 => Ok(Self {
                link: input.to_string(),
                split,
            }),
            _ => Err(MalformedLinkError {
                input: input.to_string(),
                separators,
            }),
        }
    }

    /// Parses a record id as printed by the server, with an optional `#`.
    pub fn from_rid(rid: &str) -> Result<Self, MalformedLinkError> {
        Self::parse(rid.strip_prefix('#').unwrap_or(rid))
    }

    pub fn cluster_id(&self) -> &str {
        &self.link[..self.split]
    }

    pub fn record_position(&self) -> &str {
        &self.link[self.split + 1..]
    }

    /// The cluster id as a number, if it is one.
    pub fn cluster_number(&self) -> Option<i64> {
        self.cluster_id().parse().ok()
    }

    /// The record position as a number, if it is one.
    pub fn position_number(&self) -> Option<i64> {
        self.record_position().parse().ok()
    }

    /// The link as given, without the `#` prefix.
    pub fn get(&self) -> &str {
        &self.link
    }

    /// The link in `#cluster:position` form.
    pub fn rid(&self) -> String {
        format!("#{}", self.link)
    }
}

impl FromStr for RecordLink {
    type Err = MalformedLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RecordLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.link)
    }
}

/// A base64-encoded binary blob (such as a serialized RidBag).
///
/// Decoding happens on every call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryPayload {
    b64: String,
}

impl BinaryPayload {
    pub fn new(b64: impl Into<String>) -> Self {
        Self { b64: b64.into() }
    }

    /// Wraps raw bytes, encoding them as standard base64.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            b64: STANDARD.encode(bytes),
        }
    }

    /// The base64 text as stored.
    pub fn encoded(&self) -> &str {
        &self.b64
    }

    /// The raw form with `_` sentinel delimiters, as the server prints it.
    pub fn raw(&self) -> String {
        format!("_{}_", self.b64)
    }

    /// Decodes the stored base64 text.
    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        STANDARD
            .decode(self.b64.as_bytes())
            .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_parts() {
        let link = RecordLink::parse("12:34").unwrap();
        assert_eq!(link.cluster_id(), "12");
        assert_eq!(link.record_position(), "34");
        assert_eq!(link.get(), "12:34");
        assert_eq!(link.rid(), "#12:34");
        assert_eq!(link.to_string(), "#12:34");
        assert_eq!(link.cluster_number(), Some(12));
    }

    #[test]
    fn test_link_parts_kept_verbatim() {
        let link: RecordLink = "abc:-1".parse().unwrap();
        assert_eq!(link.cluster_id(), "abc");
        assert_eq!(link.record_position(), "-1");
        assert_eq!(link.cluster_number(), None);
        assert_eq!(link.position_number(), Some(-1));
    }

    #[test]
    fn test_link_malformed() {
        let err = RecordLink::parse("bad").unwrap_err();
        assert_eq!(err.separators, 0);
        assert!(RecordLink::parse("1:2:3").is_err());
        // The `#` prefix is only stripped by from_rid
        assert!(RecordLink::parse("#1:2").is_ok());
        assert_eq!(RecordLink::from_rid("#1:2").unwrap().get(), "1:2");
    }

    #[test]
    fn test_binary_payload() {
        let payload = BinaryPayload::new("aGVsbG8=");
        assert_eq!(payload.raw(), "_aGVsbG8=_");
        assert_eq!(payload.decode().unwrap(), b"hello");
        // Idempotent
        assert_eq!(payload.decode().unwrap(), b"hello");
        assert_eq!(BinaryPayload::from_bytes(b"hello"), payload);
    }

    #[test]
    fn test_binary_payload_invalid() {
        let payload = BinaryPayload::new("not base64!");
        assert!(matches!(payload.decode(), Err(DecodeError::InvalidBase64(_))));
    }
}
