//! Well-known keys and tags found in decoded server payloads.

/// Record identity (`select @rid, ... from ...`).
pub const RID: &str = "__rid";

/// Record version (`select @version, ... from ...`).
pub const VERSION: &str = "__version";

/// Owning class name.
pub const CLASS: &str = "__o_class";

/// Internal storage wrapper; its mapping replaces the whole field map.
pub const STORAGE: &str = "__o_storage";

/// Sigil prefixing the wrapped-class shorthand key (`{"@Person": {...}}`).
pub const CLASS_SIGIL: char = '@';

/// Edge endpoint fields.
pub const EDGE_IN: &str = "in";
pub const EDGE_OUT: &str = "out";

/// Node descriptor keys.
pub const NODE_ID: &str = "id";
pub const NODE_NAME: &str = "name";
pub const NODE_STARTED_ON: &str = "startedOn";
pub const NODE_LISTENERS: &str = "listeners";
pub const LISTENER_PROTOCOL: &str = "protocol";
pub const LISTENER_LISTEN: &str = "listen";

/// Protocol tag of the binary network listener.
pub const BINARY_PROTOCOL: &str = "ONetworkProtocolBinary";

/// Returns true for the metadata keys that never appear as record fields.
pub fn is_reserved(key: &str) -> bool {
    matches!(key, RID | VERSION | CLASS | STORAGE) || shorthand_class(key).is_some()
}

/// Returns the class name carried by a shorthand key, if `key` is one.
pub fn shorthand_class(key: &str) -> Option<&str> {
    key.strip_prefix(CLASS_SIGIL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_class() {
        assert_eq!(shorthand_class("@Person"), Some("Person"));
        assert_eq!(shorthand_class("Person"), None);
        assert_eq!(shorthand_class(RID), None);
    }

    #[test]
    fn test_is_reserved() {
        assert!(is_reserved("__rid"));
        assert!(is_reserved("__o_storage"));
        assert!(is_reserved("@Person"));
        assert!(!is_reserved("name"));
        assert!(!is_reserved("in"));
    }
}
