//! Schema property declarations.
//!
//! Application code declares classes and their properties here; DDL
//! generation reads them back through [`crate::codec::ddl`].
//!
//! - [`ScalarType`], [`Cardinality`], [`PropertyType`]: what a property holds
//! - [`Property`], [`PropertyBuilder`]: descriptors and their constraints
//! - [`SchemaClass`]: the context that owns descriptors
//! - [`SchemaRegistry`], [`DeclarationCounter`]: declaration ordering

pub mod class;
pub mod property;
pub mod registry;

pub use class::SchemaClass;
pub use property::{
    Cardinality, DefaultValue, LinkTarget, Property, PropertyBuilder, PropertyOptions, PropertyType,
    ScalarType,
};
pub use registry::{DeclarationCounter, SchemaRegistry};
