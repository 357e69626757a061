//! Error types for schema declaration, record decoding and value parsing.

use thiserror::Error;

/// Error while declaring properties or classes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Structurally malformed declaration input.
    ///
    /// Conflicting constraint flags (e.g. non-nullable but not mandatory) are
    /// normalized, not rejected; only input that cannot be represented fails.
    #[error("constraint violation: {reason}")]
    ConstraintViolation { reason: String },

    #[error("property already belongs to context {current:?}, cannot attach to {requested:?}")]
    ContextAlreadySet { current: String, requested: String },

    #[error("class {class:?} already declares attribute {attribute:?}")]
    DuplicateAttribute { class: String, attribute: String },

    /// A descriptor with this declaration index is already registered.
    ///
    /// Covers a clone of a declared property as well as descriptors from
    /// different counters that happen to share an index.
    #[error("class {class:?} already registers property #{order} as {existing:?}")]
    DuplicateDeclaration {
        class: String,
        order: u64,
        existing: String,
    },

    #[error("class {name:?} is already registered")]
    DuplicateClass { name: String },
}

/// Name resolution against a missing or inconsistent context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextIntegrityError {
    #[error("property #{order} has no explicit name and no context")]
    Unattached { order: u64 },

    #[error("property #{order} belongs to {owner:?}, not {context:?}")]
    ForeignContext {
        order: u64,
        owner: String,
        context: String,
    },

    #[error("property #{order} is not registered under any attribute of {context:?}")]
    NotRegistered { order: u64, context: String },
}

/// Access to a field the record does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record has no field {field:?}")]
pub struct UndefinedFieldError {
    pub field: String,
}

/// Error while building a record from a decoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("reserved key {key:?} expects {expected}")]
    MalformedReserved { key: String, expected: &'static str },

    #[error("invalid record identity: {0}")]
    Identity(#[from] MalformedLinkError),
}

/// A record link that is not a single `cluster:position` pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed record link {input:?}: expected exactly one ':' separator, found {separators}")]
pub struct MalformedLinkError {
    pub input: String,
    pub separators: usize,
}

/// Error while decoding an opaque binary payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Error while parsing a server release string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("release string is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid major version segment {segment:?}")]
    InvalidMajor { segment: String },

    #[error("release {release:?} has no minor version segment")]
    MissingMinor { release: String },

    #[error("invalid minor version segment {segment:?}")]
    InvalidMinor { segment: String },
}

/// Error while reading a cluster node descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeDescriptorParseError {
    #[error("node descriptor is missing required key {key:?}")]
    MissingKey { key: &'static str },
}

/// Error during advisory validation of a record against a class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("mandatory property {property:?} is missing")]
    MissingMandatory { property: String },

    #[error("property {property:?} is not nullable")]
    NullNotAllowed { property: String },

    #[error("value type mismatch for property {property:?}: expected {expected}, found {found}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Context(#[from] ContextIntegrityError),
}

/// Any error raised by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    ContextIntegrity(#[from] ContextIntegrityError),
    #[error(transparent)]
    UndefinedField(#[from] UndefinedFieldError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    MalformedLink(#[from] MalformedLinkError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    VersionParse(#[from] VersionParseError),
    #[error(transparent)]
    NodeDescriptorParse(#[from] NodeDescriptorParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_error_message() {
        let err = MalformedLinkError {
            input: "bad".to_string(),
            separators: 0,
        };
        assert_eq!(
            err.to_string(),
            "malformed record link \"bad\": expected exactly one ':' separator, found 0"
        );
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: Error = UndefinedFieldError {
            field: "age".to_string(),
        }
        .into();
        assert!(matches!(err, Error::UndefinedField(_)));
        assert_eq!(err.to_string(), "record has no field \"age\"");
    }
}
