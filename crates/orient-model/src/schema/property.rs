//! Property descriptors.
//!
//! A [`Property`] is one schema field definition: a [`PropertyType`] plus
//! constraint flags, a declaration-order index and the name of the class
//! (context) that owns it.

use tracing::trace;

use crate::error::{ContextIntegrityError, SchemaError};
use crate::model::Value;
use crate::schema::{DeclarationCounter, SchemaClass};

/// Scalar property types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Boolean,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    String,
    Binary,
    Byte,
    Date,
    DateTime,
}

impl ScalarType {
    /// Returns true for the integer family, the float family and decimals.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            ScalarType::Short
                | ScalarType::Integer
                | ScalarType::Long
                | ScalarType::Float
                | ScalarType::Double
                | ScalarType::Decimal
        )
    }

    /// The server's type token.
    pub fn ddl_name(self) -> &'static str {
        match self {
            ScalarType::Boolean => "BOOLEAN",
            ScalarType::Short => "SHORT",
            ScalarType::Integer => "INTEGER",
            ScalarType::Long => "LONG",
            ScalarType::Float => "FLOAT",
            ScalarType::Double => "DOUBLE",
            ScalarType::Decimal => "DECIMAL",
            ScalarType::String => "STRING",
            ScalarType::Binary => "BINARY",
            ScalarType::Byte => "BYTE",
            ScalarType::Date => "DATE",
            ScalarType::DateTime => "DATETIME",
        }
    }
}

/// How many values a link or embedded property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Single,
    List,
    Set,
    Map,
}

impl Cardinality {
    pub fn is_multi_valued(self) -> bool {
        !matches!(self, Cardinality::Single)
    }
}

/// What a link or embedded property points to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkTarget {
    Class(String),
    /// Only valid for embedded properties.
    Primitive(ScalarType),
}

impl LinkTarget {
    pub fn ddl_name(&self) -> &str {
        match self {
            LinkTarget::Class(name) => name,
            LinkTarget::Primitive(scalar) => scalar.ddl_name(),
        }
    }
}

/// The type of a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Scalar(ScalarType),
    /// Link(s) to records; targets are restricted to classes.
    Link {
        cardinality: Cardinality,
        linked_to: Option<LinkTarget>,
    },
    /// Embedded value(s); targets may be classes or primitive types.
    Embedded {
        cardinality: Cardinality,
        linked_to: Option<LinkTarget>,
    },
}

impl PropertyType {
    /// An untyped link of the given cardinality.
    pub fn link(cardinality: Cardinality) -> Self {
        PropertyType::Link {
            cardinality,
            linked_to: None,
        }
    }

    /// A link restricted to records of `class`.
    pub fn link_to(cardinality: Cardinality, class: impl Into<String>) -> Self {
        PropertyType::Link {
            cardinality,
            linked_to: Some(LinkTarget::Class(class.into())),
        }
    }

    /// An untyped embedded value of the given cardinality.
    pub fn embedded(cardinality: Cardinality) -> Self {
        PropertyType::Embedded {
            cardinality,
            linked_to: None,
        }
    }

    /// An embedded value whose entries are `target`.
    pub fn embedded_of(cardinality: Cardinality, target: LinkTarget) -> Self {
        PropertyType::Embedded {
            cardinality,
            linked_to: Some(target),
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            PropertyType::Scalar(_) => Cardinality::Single,
            PropertyType::Link { cardinality, .. } | PropertyType::Embedded { cardinality, .. } => {
                *cardinality
            }
        }
    }

    pub fn linked_to(&self) -> Option<&LinkTarget> {
        match self {
            PropertyType::Scalar(_) => None,
            PropertyType::Link { linked_to, .. } | PropertyType::Embedded { linked_to, .. } => {
                linked_to.as_ref()
            }
        }
    }

    pub fn is_multi_valued(&self) -> bool {
        self.cardinality().is_multi_valued()
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(self, PropertyType::Scalar(s) if s.is_arithmetic())
    }

    /// The server's type token (`LINKLIST`, `EMBEDDEDMAP`, ...).
    pub fn ddl_name(&self) -> &'static str {
        match self {
            PropertyType::Scalar(scalar) => scalar.ddl_name(),
            PropertyType::Link { cardinality, .. } => match cardinality {
                Cardinality::Single => "LINK",
                Cardinality::List => "LINKLIST",
                Cardinality::Set => "LINKSET",
                Cardinality::Map => "LINKMAP",
            },
            PropertyType::Embedded { cardinality, .. } => match cardinality {
                Cardinality::Single => "EMBEDDED",
                Cardinality::List => "EMBEDDEDLIST",
                Cardinality::Set => "EMBEDDEDSET",
                Cardinality::Map => "EMBEDDEDMAP",
            },
        }
    }

    fn check(&self) -> Result<(), SchemaError> {
        match self {
            PropertyType::Link {
                linked_to: Some(LinkTarget::Primitive(scalar)),
                ..
            } => Err(SchemaError::ConstraintViolation {
                reason: format!(
                    "{} cannot link to primitive type {}",
                    self.ddl_name(),
                    scalar.ddl_name()
                ),
            }),
            PropertyType::Link {
                linked_to: Some(LinkTarget::Class(class)),
                ..
            }
            | PropertyType::Embedded {
                linked_to: Some(LinkTarget::Class(class)),
                ..
            } if class.is_empty() => Err(SchemaError::ConstraintViolation {
                reason: format!("{} target class name is empty", self.ddl_name()),
            }),
            _ => Ok(()),
        }
    }
}

impl From<ScalarType> for PropertyType {
    fn from(scalar: ScalarType) -> Self {
        PropertyType::Scalar(scalar)
    }
}

/// Default value of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Value(Value),
    /// Server-generated UUID (`UUID()`).
    Uuid,
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Value(value)
    }
}

/// Constraint arguments of a declaration, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyOptions {
    /// Overrides the attribute name the property is declared under.
    pub name: Option<String>,
    pub nullable: bool,
    pub default: Option<DefaultValue>,
    pub indexed: bool,
    /// Implies `indexed`.
    pub unique: bool,
    /// Forced to true when `nullable` is false.
    pub mandatory: bool,
    pub readonly: bool,
}

impl Default for PropertyOptions {
    fn default() -> Self {
        Self {
            name: None,
            nullable: true,
            default: None,
            indexed: false,
            unique: false,
            mandatory: false,
            readonly: false,
        }
    }
}

/// A schema field definition.
///
/// Immutable after construction, except for the owning context which is set
/// once when the property is declared on a [`SchemaClass`].
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: Option<String>,
    property_type: PropertyType,
    nullable: bool,
    mandatory: bool,
    default: Option<DefaultValue>,
    indexed: bool,
    unique: bool,
    readonly: bool,
    order: u64,
    context: Option<String>,
}

impl Property {
    /// Creates a property, normalizing its constraints and drawing the next
    /// declaration index from `counter`.
    ///
    /// `unique` implies `indexed`; a non-nullable property is always
    /// mandatory. No index is consumed if the type is malformed.
    pub fn new(
        property_type: PropertyType,
        options: PropertyOptions,
        counter: &DeclarationCounter,
    ) -> Result<Self, SchemaError> {
        property_type.check()?;

        let PropertyOptions {
            name,
            nullable,
            default,
            indexed,
            unique,
            mandatory,
            readonly,
        } = options;

        let order = counter.next_index();
        trace!(order, kind = property_type.ddl_name(), name = ?name, "declared property");

        Ok(Self {
            name,
            property_type,
            nullable,
            mandatory: mandatory || !nullable,
            default,
            indexed: indexed || unique,
            unique,
            readonly,
            order,
            context: None,
        })
    }

    /// The explicit name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn property_type(&self) -> &PropertyType {
        &self.property_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Declaration-order index.
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Name of the owning class.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Sets the owning class. Attaching again to the same class is a no-op;
    /// attaching to another class fails.
    pub fn attach(&mut self, context: &str) -> Result<(), SchemaError> {
        match &self.context {
            Some(current) if current == context => Ok(()),
            Some(current) => Err(SchemaError::ContextAlreadySet {
                current: current.clone(),
                requested: context.to_string(),
            }),
            None => {
                self.context = Some(context.to_string());
                Ok(())
            }
        }
    }

    /// Resolves the property's name: the explicit name if any, otherwise the
    /// attribute it is registered under in `context`.
    pub fn resolve_name<'a>(&'a self, context: &'a SchemaClass) -> Result<&'a str, ContextIntegrityError> {
        if let Some(name) = &self.name {
            return Ok(name);
        }
        match &self.context {
            None => Err(ContextIntegrityError::Unattached { order: self.order }),
            Some(owner) if owner != context.name() => Err(ContextIntegrityError::ForeignContext {
                order: self.order,
                owner: owner.clone(),
                context: context.name().to_string(),
            }),
            Some(_) => context
                .attribute_of(self.order)
                .ok_or_else(|| ContextIntegrityError::NotRegistered {
                    order: self.order,
                    context: context.name().to_string(),
                }),
        }
    }
}

/// Fluent construction of a [`Property`].
///
/// ```rust
/// use orient_model::schema::{ScalarType, SchemaRegistry};
///
/// let registry = SchemaRegistry::new();
/// let email = registry
///     .property(ScalarType::String)
///     .nullable(false)
///     .unique(true)
///     .build()
///     .unwrap();
/// assert!(email.is_mandatory());
/// assert!(email.is_indexed());
/// ```
#[derive(Debug, Clone)]
pub struct PropertyBuilder<'a> {
    counter: &'a DeclarationCounter,
    property_type: PropertyType,
    options: PropertyOptions,
}

impl<'a> PropertyBuilder<'a> {
    pub fn new(counter: &'a DeclarationCounter, property_type: impl Into<PropertyType>) -> Self {
        Self {
            counter,
            property_type: property_type.into(),
            options: PropertyOptions::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.options.nullable = nullable;
        self
    }

    pub fn default(mut self, default: DefaultValue) -> Self {
        self.options.default = Some(default);
        self
    }

    /// Sets a literal default value.
    pub fn default_value(self, value: impl Into<Value>) -> Self {
        self.default(DefaultValue::Value(value.into()))
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.options.indexed = indexed;
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.options.unique = unique;
        self
    }

    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.options.mandatory = mandatory;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.options.readonly = readonly;
        self
    }

    pub fn build(self) -> Result<Property, SchemaError> {
        Property::new(self.property_type, self.options, self.counter)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_defaults() {
        let counter = DeclarationCounter::new();
        let p = PropertyBuilder::new(&counter, ScalarType::Integer).build().unwrap();
        assert!(p.is_nullable());
        assert!(!p.is_mandatory());
        assert!(!p.is_indexed());
        assert!(!p.is_unique());
        assert!(!p.is_readonly());
        assert_eq!(p.default_value(), None);
        assert_eq!(p.name(), None);
        assert_eq!(p.context(), None);
        assert!(p.property_type().is_arithmetic());
    }

    #[test]
    fn test_nullable_mandatory_is_kept() {
        let counter = DeclarationCounter::new();
        let p = PropertyBuilder::new(&counter, ScalarType::String)
            .mandatory(true)
            .build()
            .unwrap();
        assert!(p.is_nullable());
        assert!(p.is_mandatory());
    }

    #[test]
    fn test_link_to_primitive_rejected() {
        let counter = DeclarationCounter::new();
        let bad = PropertyType::Link {
            cardinality: Cardinality::List,
            linked_to: Some(LinkTarget::Primitive(ScalarType::String)),
        };
        let err = PropertyBuilder::new(&counter, bad).build().unwrap_err();
        assert!(matches!(err, SchemaError::ConstraintViolation { .. }));
        // The failed declaration consumed no index
        assert_eq!(counter.peek(), 0);

        let ok = PropertyType::embedded_of(Cardinality::List, LinkTarget::Primitive(ScalarType::String));
        assert!(PropertyBuilder::new(&counter, ok).build().is_ok());
    }

    #[test]
    fn test_empty_target_class_rejected() {
        let counter = DeclarationCounter::new();
        let err = PropertyBuilder::new(&counter, PropertyType::link_to(Cardinality::Single, ""))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ConstraintViolation { .. }));
    }

    #[test]
    fn test_type_capabilities() {
        assert_eq!(PropertyType::link(Cardinality::Set).ddl_name(), "LINKSET");
        assert_eq!(PropertyType::embedded(Cardinality::Map).ddl_name(), "EMBEDDEDMAP");
        assert_eq!(PropertyType::from(ScalarType::DateTime).ddl_name(), "DATETIME");
        assert!(PropertyType::link(Cardinality::List).is_multi_valued());
        assert!(!PropertyType::link(Cardinality::Single).is_multi_valued());
        assert!(!PropertyType::from(ScalarType::String).is_multi_valued());
        assert!(!PropertyType::from(ScalarType::Boolean).is_arithmetic());
        assert!(ScalarType::Decimal.is_arithmetic());
        assert_eq!(
            PropertyType::link_to(Cardinality::List, "Person").linked_to(),
            Some(&LinkTarget::Class("Person".to_string()))
        );
    }

    #[test]
    fn test_attach_once() {
        let counter = DeclarationCounter::new();
        let mut p = PropertyBuilder::new(&counter, ScalarType::String).build().unwrap();
        p.attach("Person").unwrap();
        p.attach("Person").unwrap();
        let err = p.attach("Place").unwrap_err();
        assert_eq!(
            err,
            SchemaError::ContextAlreadySet {
                current: "Person".to_string(),
                requested: "Place".to_string(),
            }
        );
        assert_eq!(p.context(), Some("Person"));
    }

    #[test]
    fn test_resolve_name_unattached() {
        let counter = DeclarationCounter::new();
        let class = SchemaClass::new("Person");
        let p = PropertyBuilder::new(&counter, ScalarType::String).build().unwrap();
        assert!(matches!(
            p.resolve_name(&class),
            Err(ContextIntegrityError::Unattached { .. })
        ));

        let named = PropertyBuilder::new(&counter, ScalarType::String)
            .name("explicit")
            .build()
            .unwrap();
        assert_eq!(named.resolve_name(&class).unwrap(), "explicit");
    }

    #[test]
    fn test_resolve_name_not_registered() {
        let counter = DeclarationCounter::new();
        let class = SchemaClass::new("Person");
        let mut p = PropertyBuilder::new(&counter, ScalarType::String).build().unwrap();
        p.attach("Person").unwrap();
        assert!(matches!(
            p.resolve_name(&class),
            Err(ContextIntegrityError::NotRegistered { .. })
        ));
        assert!(matches!(
            p.resolve_name(&SchemaClass::new("Place")),
            Err(ContextIntegrityError::ForeignContext { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_not_nullable_implies_mandatory(mandatory: bool, indexed: bool, unique: bool, readonly: bool) {
            let counter = DeclarationCounter::new();
            let p = PropertyBuilder::new(&counter, ScalarType::Long)
                .nullable(false)
                .mandatory(mandatory)
                .indexed(indexed)
                .unique(unique)
                .readonly(readonly)
                .build()
                .unwrap();
            prop_assert!(p.is_mandatory());
            prop_assert!(!p.is_nullable());
            prop_assert_eq!(p.is_readonly(), readonly);
        }

        #[test]
        fn prop_unique_implies_indexed(nullable: bool, mandatory: bool, indexed: bool) {
            let counter = DeclarationCounter::new();
            let p = PropertyBuilder::new(&counter, ScalarType::String)
                .nullable(nullable)
                .mandatory(mandatory)
                .indexed(indexed)
                .unique(true)
                .build()
                .unwrap();
            prop_assert!(p.is_indexed());
            prop_assert!(p.is_unique());
            prop_assert_eq!(p.is_mandatory(), mandatory || !nullable);
        }

        #[test]
        fn prop_declaration_order_has_no_gaps(n in 1usize..64) {
            let counter = DeclarationCounter::new();
            let orders: Vec<u64> = (0..n)
                .map(|_| PropertyBuilder::new(&counter, ScalarType::Byte).build().unwrap().order())
                .collect();
            for pair in orders.windows(2) {
                prop_assert_eq!(pair[1], pair[0] + 1);
            }
            prop_assert_eq!(orders[0], 0);
        }
    }
}
