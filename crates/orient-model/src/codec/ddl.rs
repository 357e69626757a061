//! Schema statements for declared classes.
//!
//! Renders `CREATE CLASS`, `CREATE PROPERTY` and `CREATE INDEX` statements
//! from [`SchemaClass`] declarations, properties in declaration order.

use crate::codec::literal::encode_default;
use crate::error::ContextIntegrityError;
use crate::schema::{Property, SchemaClass};

/// `CREATE CLASS <name> [EXTENDS <superclass>]`.
pub fn create_class_statement(class: &SchemaClass) -> String {
    match class.superclass() {
        Some(superclass) => format!("CREATE CLASS {} EXTENDS {}", class.name(), superclass),
        None => format!("CREATE CLASS {}", class.name()),
    }
}

/// Constraint list of a property, e.g. `(MANDATORY TRUE, NOTNULL TRUE)`.
///
/// Returns `None` when the property carries no constraint.
pub fn constraint_clause(property: &Property) -> Option<String> {
    let mut constraints = Vec::new();
    if property.is_mandatory() {
        constraints.push("MANDATORY TRUE".to_string());
    }
    if !property.is_nullable() {
        constraints.push("NOTNULL TRUE".to_string());
    }
    if property.is_readonly() {
        constraints.push("READONLY TRUE".to_string());
    }
    if let Some(default) = property.default_value() {
        constraints.push(format!("DEFAULT {}", encode_default(default)));
    }

    if constraints.is_empty() {
        None
    } else {
        Some(format!("({})", constraints.join(", ")))
    }
}

/// `CREATE PROPERTY <Class>.<name> <TYPE> [<linked>] [(<constraints>)]`.
pub fn create_property_statement(
    class: &SchemaClass,
    property: &Property,
) -> Result<String, ContextIntegrityError> {
    let name = class.resolve_name(property)?;
    let property_type = property.property_type();

    let mut statement = format!(
        "CREATE PROPERTY {}.{} {}",
        class.name(),
        name,
        property_type.ddl_name()
    );
    if let Some(target) = property_type.linked_to() {
        statement.push(' ');
        statement.push_str(target.ddl_name());
    }
    if let Some(clause) = constraint_clause(property) {
        statement.push(' ');
        statement.push_str(&clause);
    }
    Ok(statement)
}

/// `CREATE INDEX <Class>.<name> UNIQUE|NOTUNIQUE`, for indexed properties.
pub fn create_index_statement(
    class: &SchemaClass,
    property: &Property,
) -> Result<Option<String>, ContextIntegrityError> {
    if !property.is_indexed() {
        return Ok(None);
    }
    let name = class.resolve_name(property)?;
    let kind = if property.is_unique() { "UNIQUE" } else { "NOTUNIQUE" };
    Ok(Some(format!("CREATE INDEX {}.{} {}", class.name(), name, kind)))
}

/// All statements for a class: the class, its properties, then its indexes.
pub fn class_statements(class: &SchemaClass) -> Result<Vec<String>, ContextIntegrityError> {
    let mut statements = vec![create_class_statement(class)];
    for (_, property) in class.properties() {
        statements.push(create_property_statement(class, property)?);
    }
    for (_, property) in class.properties() {
        if let Some(index) = create_index_statement(class, property)? {
            statements.push(index);
        }
    }
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::model::Value;
    use crate::schema::{
        Cardinality, DeclarationCounter, DefaultValue, LinkTarget, PropertyBuilder, PropertyType,
        ScalarType,
    };

    #[test]
    fn test_class_statements() {
        let counter = DeclarationCounter::new();
        let mut person = SchemaClass::new("Person").with_superclass("V");
        person
            .declare(
                "email",
                PropertyBuilder::new(&counter, ScalarType::String)
                    .nullable(false)
                    .unique(true)
                    .build()
                    .unwrap(),
            )
            .unwrap();
        person
            .declare(
                "friends",
                PropertyBuilder::new(&counter, PropertyType::link_to(Cardinality::Set, "Person"))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        person
            .declare(
                "salary",
                PropertyBuilder::new(&counter, ScalarType::Decimal)
                    .default_value(BigDecimal::from_str("1.50").unwrap())
                    .indexed(true)
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let statements = class_statements(&person).unwrap();
        assert_eq!(
            statements,
            vec![
                "CREATE CLASS Person EXTENDS V",
                "CREATE PROPERTY Person.email STRING (MANDATORY TRUE, NOTNULL TRUE)",
                "CREATE PROPERTY Person.friends LINKSET Person",
                "CREATE PROPERTY Person.salary DECIMAL (DEFAULT '1.50')",
                "CREATE INDEX Person.email UNIQUE",
                "CREATE INDEX Person.salary NOTUNIQUE",
            ]
        );
    }

    #[test]
    fn test_explicit_name_and_embedded_primitive() {
        let counter = DeclarationCounter::new();
        let mut doc = SchemaClass::new("Doc");
        doc.declare(
            "tag_list",
            PropertyBuilder::new(
                &counter,
                PropertyType::embedded_of(Cardinality::List, LinkTarget::Primitive(ScalarType::String)),
            )
            .name("tags")
            .readonly(true)
            .default(DefaultValue::Uuid)
            .build()
            .unwrap(),
        )
        .unwrap();

        let property = doc.property("tag_list").unwrap();
        assert_eq!(
            create_property_statement(&doc, property).unwrap(),
            "CREATE PROPERTY Doc.tags EMBEDDEDLIST STRING (READONLY TRUE, DEFAULT UUID())"
        );
        assert_eq!(create_index_statement(&doc, property).unwrap(), None);
        assert_eq!(create_class_statement(&doc), "CREATE CLASS Doc");
    }

    #[test]
    fn test_unregistered_property_fails() {
        let counter = DeclarationCounter::new();
        let class = SchemaClass::new("Person");
        let orphan = PropertyBuilder::new(&counter, ScalarType::String)
            .indexed(true)
            .build()
            .unwrap();
        assert!(create_property_statement(&class, &orphan).is_err());
        assert!(create_index_statement(&class, &orphan).is_err());
    }

    #[test]
    fn test_constraint_clause_null_default() {
        let counter = DeclarationCounter::new();
        let p = PropertyBuilder::new(&counter, ScalarType::String)
            .default_value(Value::Null)
            .build()
            .unwrap();
        assert_eq!(constraint_clause(&p).as_deref(), Some("(DEFAULT null)"));
    }
}
