//! Textual encoding for schema statements.
//!
//! This module turns values and declarations into the literal and statement
//! syntax understood by the server's schema language.

pub mod ddl;
pub mod literal;

pub use ddl::{
    class_statements, constraint_clause, create_class_statement, create_index_statement,
    create_property_statement,
};
pub use literal::{encode_default, encode_document, encode_literal, encode_optional, quote_str};
