//! Semantic validation of records against declared classes.
//!
//! Record construction only checks structure. Checking field values against
//! property declarations requires the class, so it lives here.
//!
//! **Note:** Validation is advisory. Fields the class does not declare are
//! allowed; the server remains the authority on schema enforcement.

use crate::error::ValidationError;
use crate::model::{Record, Value};
use crate::schema::{Cardinality, LinkTarget, PropertyType, ScalarType, SchemaClass};

/// Validates a record against a class.
///
/// This checks, for each declared property:
/// - Mandatory properties are present
/// - Non-nullable properties are not null
/// - Present values are compatible with the property type
pub fn validate_record(record: &Record, class: &SchemaClass) -> Result<(), ValidationError> {
    for (_, property) in class.properties() {
        let name = class.resolve_name(property)?;
        match record.get_field(name) {
            Err(_) => {
                if property.is_mandatory() {
                    return Err(ValidationError::MissingMandatory {
                        property: name.to_string(),
                    });
                }
            }
            Ok(Value::Null) => {
                if !property.is_nullable() {
                    return Err(ValidationError::NullNotAllowed {
                        property: name.to_string(),
                    });
                }
            }
            Ok(value) => {
                let property_type = property.property_type();
                if !value_matches(property_type, value) {
                    return Err(ValidationError::TypeMismatch {
                        property: name.to_string(),
                        expected: property_type.ddl_name(),
                        found: value.data_type().name(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Returns true if `value` can be stored in a property of `property_type`.
///
/// `Null` matches every type; nullability is checked separately.
pub fn value_matches(property_type: &PropertyType, value: &Value) -> bool {
    if value.is_null() {
        return true;
    }
    match property_type {
        PropertyType::Scalar(scalar) => scalar_matches(*scalar, value),
        PropertyType::Link { cardinality, .. } => match cardinality {
            Cardinality::Single => matches!(value, Value::Link(_)),
            // Link collections may arrive as a serialized RidBag
            Cardinality::List | Cardinality::Set => match value {
                Value::List(items) => items.iter().all(|v| matches!(v, Value::Link(_))),
                Value::Binary(_) => true,
                _ => false,
            },
            Cardinality::Map => match value {
                Value::Map(map) => map.values().all(|v| matches!(v, Value::Link(_))),
                _ => false,
            },
        },
        PropertyType::Embedded {
            cardinality,
            linked_to,
        } => {
            let element = |v: &Value| match linked_to {
                Some(LinkTarget::Primitive(scalar)) => v.is_null() || scalar_matches(*scalar, v),
                _ => true,
            };
            match cardinality {
                Cardinality::Single => match linked_to {
                    Some(LinkTarget::Primitive(scalar)) => scalar_matches(*scalar, value),
                    _ => matches!(value, Value::Map(_)),
                },
                Cardinality::List | Cardinality::Set => match value {
                    Value::List(items) => items.iter().all(element),
                    _ => false,
                },
                Cardinality::Map => match value {
                    Value::Map(map) => map.values().all(element),
                    _ => false,
                },
            }
        }
    }
}

fn scalar_matches(scalar: ScalarType, value: &Value) -> bool {
    match scalar {
        ScalarType::Boolean => matches!(value, Value::Bool(_)),
        ScalarType::Short | ScalarType::Integer | ScalarType::Long | ScalarType::Byte => {
            matches!(value, Value::Int(_))
        }
        ScalarType::Float | ScalarType::Double => matches!(value, Value::Float(_) | Value::Int(_)),
        ScalarType::Decimal => matches!(value, Value::Decimal(_) | Value::Int(_)),
        ScalarType::String => matches!(value, Value::String(_)),
        ScalarType::Binary => matches!(value, Value::Bytes(_) | Value::Binary(_)),
        // Temporal values arrive as formatted text or epoch milliseconds
        ScalarType::Date | ScalarType::DateTime => matches!(value, Value::String(_) | Value::Int(_)),
    }
}
