//! Schema classes: the contexts that own property descriptors.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{ContextIntegrityError, SchemaError};
use crate::schema::Property;

/// A class definition holding its declared properties.
///
/// Each property is registered under an attribute name when it is declared;
/// name resolution is a lookup in that registration, never a scan of the
/// class's other state.
#[derive(Debug, Clone, Default)]
pub struct SchemaClass {
    name: String,
    superclass: Option<String>,
    entries: Vec<(String, Property)>,
    by_attribute: FxHashMap<String, usize>,
    by_order: FxHashMap<u64, usize>,
}

impl SchemaClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    /// Declares `property` under `attribute`, making this class its context.
    ///
    /// A class holds each declaration index at most once, so a property
    /// resolves to exactly one attribute.
    pub fn declare(&mut self, attribute: impl Into<String>, mut property: Property) -> Result<&Property, SchemaError> {
        let attribute = attribute.into();
        if self.by_attribute.contains_key(&attribute) {
            return Err(SchemaError::DuplicateAttribute {
                class: self.name.clone(),
                attribute,
            });
        }
        if let Some(&i) = self.by_order.get(&property.order()) {
            return Err(SchemaError::DuplicateDeclaration {
                class: self.name.clone(),
                order: property.order(),
                existing: self.entries[i].0.clone(),
            });
        }
        property.attach(&self.name)?;

        trace!(class = %self.name, attribute = %attribute, order = property.order(), "registered property");

        let index = self.entries.len();
        self.by_attribute.insert(attribute.clone(), index);
        self.by_order.insert(property.order(), index);
        self.entries.push((attribute, property));
        Ok(&self.entries[index].1)
    }

    /// The property declared under `attribute`.
    pub fn property(&self, attribute: &str) -> Option<&Property> {
        self.by_attribute.get(attribute).map(|&i| &self.entries[i].1)
    }

    /// The attribute a property with declaration index `order` is registered under.
    pub fn attribute_of(&self, order: u64) -> Option<&str> {
        self.by_order.get(&order).map(|&i| self.entries[i].0.as_str())
    }

    /// Resolves the name of a property owned by this class.
    pub fn resolve_name<'a>(&'a self, property: &'a Property) -> Result<&'a str, ContextIntegrityError> {
        property.resolve_name(self)
    }

    /// Attribute/property pairs in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Property)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|(_, p)| p.order());
        entries.into_iter().map(|(attr, p)| (attr.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
