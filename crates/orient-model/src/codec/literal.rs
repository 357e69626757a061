//! Literal encoding for schema statements.
//!
//! Turns values into the textual literals the server's DDL accepts.

use std::fmt::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::model::{Document, Value};
use crate::schema::DefaultValue;

/// Literal for an absent value.
pub const NULL: &str = "null";

/// Literal for a server-generated UUID default.
pub const UUID_FUNCTION: &str = "UUID()";

/// Encodes a value as a literal.
///
/// Decimals are written as quoted strings so they survive the statement
/// parser without losing precision. Never fails.
pub fn encode_literal(value: &Value) -> String {
    let mut out = String::new();
    write_literal(&mut out, value);
    out
}

/// Encodes a mapping as `{'key': literal, ...}`, keys in sorted order.
pub fn encode_document(doc: &Document) -> String {
    let mut out = String::new();
    write_document(&mut out, doc);
    out
}

/// Encodes an optional value; `None` encodes as `null`.
pub fn encode_optional(value: Option<&Value>) -> String {
    value.map_or_else(|| NULL.to_string(), encode_literal)
}

/// Encodes a property default.
pub fn encode_default(default: &DefaultValue) -> String {
    match default {
        DefaultValue::Value(value) => encode_literal(value),
        DefaultValue::Uuid => UUID_FUNCTION.to_string(),
    }
}

/// Quotes text as a string literal.
///
/// Single quotes are used unless the text contains a single quote and no
/// double quote. Backslashes, the chosen quote and control characters are
/// escaped.
pub fn quote_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    write_quoted(&mut out, text);
    out
}

fn write_quoted(out: &mut String, text: &str) {
    let quote = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

fn write_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str(NULL),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        // Non-finite values have no numeric literal; quote the names the server parses
        Value::Float(f) if f.is_nan() => write_quoted(out, "NaN"),
        Value::Float(f) if f.is_infinite() => {
            write_quoted(out, if *f > 0.0 { "Infinity" } else { "-Infinity" })
        }
        Value::Float(f) => {
            // Debug keeps the fractional part (1.0 rather than 1)
            let _ = write!(out, "{f:?}");
        }
        Value::Decimal(d) => write_quoted(out, &d.to_string()),
        Value::String(s) => write_quoted(out, s),
        Value::Bytes(bytes) => write_quoted(out, &STANDARD.encode(bytes)),
        Value::Link(link) => {
            let _ = write!(out, "{link}");
        }
        Value::Binary(payload) => out.push_str(&payload.raw()),
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_literal(out, item);
            }
            out.push(']');
        }
        Value::Map(map) => write_document(out, map),
    }
}

fn write_document(out: &mut String, doc: &Document) {
    out.push('{');
    for (i, (key, item)) in doc.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_quoted(out, key);
        out.push_str(": ");
        write_literal(out, item);
    }
    out.push('}');
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use proptest::prelude::*;

    use super::*;
    use crate::model::{BinaryPayload, RecordLink};

    #[test]
    fn test_decimal_is_quoted() {
        let d = BigDecimal::from_str("3.14").unwrap();
        assert_eq!(encode_literal(&Value::Decimal(d)), "'3.14'");
    }

    #[test]
    fn test_string_quoting() {
        assert_eq!(quote_str("abc"), "'abc'");
        assert_eq!(quote_str("it's"), "\"it's\"");
        assert_eq!(quote_str("say \"hi\""), "'say \"hi\"'");
        assert_eq!(quote_str("it's \"x\""), "'it\\'s \"x\"'");
        assert_eq!(quote_str("a\\b"), "'a\\\\b'");
        assert_eq!(quote_str("line\nnext\t"), "'line\\nnext\\t'");
        assert_eq!(quote_str("\u{1}"), "'\\x01'");
        assert_eq!(quote_str("naïve"), "'naïve'");
    }

    #[test]
    fn test_null_and_passthrough() {
        assert_eq!(encode_literal(&Value::Null), "null");
        assert_eq!(encode_optional(None), "null");
        assert_eq!(encode_optional(Some(&Value::Int(7))), "7");
        assert_eq!(encode_literal(&Value::Bool(true)), "true");
        assert_eq!(encode_literal(&Value::Int(-42)), "-42");
        assert_eq!(encode_literal(&Value::Float(1.0)), "1.0");
        assert_eq!(encode_literal(&Value::Float(2.5)), "2.5");
    }

    #[test]
    fn test_non_finite_floats_are_quoted() {
        assert_eq!(encode_literal(&Value::Float(f64::NAN)), "'NaN'");
        assert_eq!(encode_literal(&Value::Float(f64::INFINITY)), "'Infinity'");
        assert_eq!(encode_literal(&Value::Float(f64::NEG_INFINITY)), "'-Infinity'");
    }

    #[test]
    fn test_composite_literals() {
        let link = RecordLink::parse("5:1").unwrap();
        assert_eq!(encode_literal(&Value::Link(link)), "#5:1");
        assert_eq!(encode_literal(&Value::Binary(BinaryPayload::new("AAE="))), "_AAE=_");
        assert_eq!(encode_literal(&Value::Bytes(vec![0, 1])), "'AAE='");

        let list = Value::List(vec![Value::Int(1), Value::from("a"), Value::Null]);
        assert_eq!(encode_literal(&list), "[1, 'a', null]");

        let mut map = Document::new();
        map.insert("b".to_string(), Value::Int(2));
        map.insert("a".to_string(), Value::from("x"));
        assert_eq!(encode_literal(&Value::Map(map)), "{'a': 'x', 'b': 2}");
        assert_eq!(encode_literal(&Value::Map(Document::new())), "{}");
    }

    #[test]
    fn test_encode_default() {
        assert_eq!(encode_default(&DefaultValue::Uuid), "UUID()");
        assert_eq!(encode_default(&DefaultValue::Value(Value::from("n/a"))), "'n/a'");
    }

    proptest! {
        #[test]
        fn prop_decimal_literal_roundtrip(mantissa: i64, scale in 0i64..12) {
            let d = BigDecimal::new(mantissa.into(), scale);
            let literal = encode_literal(&Value::Decimal(d.clone()));
            prop_assert!(literal.starts_with('\'') && literal.ends_with('\''));
            let inner = &literal[1..literal.len() - 1];
            prop_assert_eq!(inner, d.to_string());
            prop_assert_eq!(BigDecimal::from_str(inner).unwrap(), d);
        }

        #[test]
        fn prop_plain_text_is_wrapped_verbatim(text in "[a-zA-Z0-9 .,:-]*") {
            prop_assert_eq!(quote_str(&text), format!("'{text}'"));
        }
    }
}
