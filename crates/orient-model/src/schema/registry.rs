//! Declaration counter and class registry.

use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::SchemaError;
use crate::schema::{PropertyBuilder, PropertyType, SchemaClass};

/// Source of declaration-order indices.
///
/// Indices increase by one per declared property. The increment is atomic,
/// but schemas are expected to be declared from a single thread during
/// startup; interleaving declarations from several threads yields unique
/// indices whose order no longer reflects any one class body.
#[derive(Debug, Default)]
pub struct DeclarationCounter {
    next: AtomicU64,
}

impl DeclarationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next index.
    pub fn next_index(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The index the next declaration will receive.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

/// Owns the declaration counter and the classes defined against it.
///
/// ```rust
/// use orient_model::schema::{Cardinality, PropertyType, ScalarType, SchemaClass, SchemaRegistry};
///
/// let mut registry = SchemaRegistry::new();
/// let mut person = SchemaClass::new("Person").with_superclass("V");
/// person.declare("name", registry.property(ScalarType::String).nullable(false).build()?)?;
/// person.declare("friends", registry.property(PropertyType::link_to(Cardinality::Set, "Person")).build()?)?;
/// registry.register(person)?;
///
/// assert_eq!(registry.class("Person").unwrap().len(), 2);
/// # Ok::<(), orient_model::SchemaError>(())
/// ```
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    counter: DeclarationCounter,
    classes: Vec<SchemaClass>,
    by_name: FxHashMap<String, usize>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> &DeclarationCounter {
        &self.counter
    }

    /// Starts declaring a property of the given type.
    pub fn property(&self, property_type: impl Into<PropertyType>) -> PropertyBuilder<'_> {
        PropertyBuilder::new(&self.counter, property_type)
    }

    /// Registers a fully declared class.
    pub fn register(&mut self, class: SchemaClass) -> Result<&SchemaClass, SchemaError> {
        if self.by_name.contains_key(class.name()) {
            return Err(SchemaError::DuplicateClass {
                name: class.name().to_string(),
            });
        }
        debug!(class = class.name(), properties = class.len(), "registered class");

        let index = self.classes.len();
        self.by_name.insert(class.name().to_string(), index);
        self.classes.push(class);
        Ok(&self.classes[index])
    }

    pub fn class(&self, name: &str) -> Option<&SchemaClass> {
        self.by_name.get(name).map(|&i| &self.classes[i])
    }

    /// Classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &SchemaClass> {
        self.classes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ScalarType;

    #[test]
    fn test_counter_is_monotonic() {
        let counter = DeclarationCounter::new();
        assert_eq!(counter.peek(), 0);
        assert_eq!(counter.next_index(), 0);
        assert_eq!(counter.next_index(), 1);
        assert_eq!(counter.peek(), 2);
    }

    #[test]
    fn test_registries_count_independently() {
        let a = SchemaRegistry::new();
        let b = SchemaRegistry::new();
        let pa = a.property(ScalarType::String).build().unwrap();
        let pb = b.property(ScalarType::String).build().unwrap();
        assert_eq!(pa.order(), 0);
        assert_eq!(pb.order(), 0);
        assert_eq!(a.property(ScalarType::Long).build().unwrap().order(), 1);
    }

    #[test]
    fn test_duplicate_class() {
        let mut registry = SchemaRegistry::new();
        registry.register(SchemaClass::new("Person")).unwrap();
        registry.register(SchemaClass::new("Place")).unwrap();
        let err = registry.register(SchemaClass::new("Person")).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateClass {
                name: "Person".to_string()
            }
        );
        let names: Vec<&str> = registry.classes().map(SchemaClass::name).collect();
        assert_eq!(names, vec!["Person", "Place"]);
        assert!(registry.class("Nope").is_none());
    }
}
