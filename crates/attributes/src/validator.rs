//! Attribute validation capability and its datatype-driven implementation.

use std::sync::Arc;

use locus_core::{ViolationCode, Violations};

use crate::definition::AttributeTypeDefinition;
use crate::value::Customizable;

/// Capability that validates an entity's declared attribute values against a
/// set of type definitions.
///
/// Violations are appended to the shared accumulator with fields of the form
/// `attributes.{type name}`, alongside whatever the caller's own checks
/// recorded. Implementations must not short-circuit: every definition is
/// checked.
pub trait AttributeValidator: Send + Sync {
    fn validate_attributes(
        &self,
        entity: &dyn Customizable,
        definitions: &[AttributeTypeDefinition],
        violations: &mut Violations,
    );
}

impl<A> AttributeValidator for Arc<A>
where
    A: AttributeValidator + ?Sized,
{
    fn validate_attributes(
        &self,
        entity: &dyn Customizable,
        definitions: &[AttributeTypeDefinition],
        violations: &mut Violations,
    ) {
        (**self).validate_attributes(entity, definitions, violations)
    }
}

/// Default validator: required-ness, cardinality, and datatype conformance.
///
/// Values whose `type_id` matches no supplied definition are ignored; the
/// registry owns the type universe and undefined types are its concern.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatatypeAttributeValidator;

impl DatatypeAttributeValidator {
    pub fn new() -> Self {
        Self
    }
}

impl AttributeValidator for DatatypeAttributeValidator {
    fn validate_attributes(
        &self,
        entity: &dyn Customizable,
        definitions: &[AttributeTypeDefinition],
        violations: &mut Violations,
    ) {
        for def in definitions {
            let values: Vec<_> = entity
                .attribute_values()
                .iter()
                .filter(|v| v.type_id == def.id)
                .collect();
            let field = format!("attributes.{}", def.name);

            if def.is_required() && values.is_empty() {
                violations.reject(&field, ViolationCode::Missing);
            }
            if let Some(max) = def.max_occurs {
                if values.len() as u32 > max {
                    violations.reject(&field, ViolationCode::TooMany);
                }
            }
            for value in values {
                if !def.datatype.accepts(&value.value) {
                    violations.reject(&field, ViolationCode::InvalidValue);
                }
            }
        }
    }
}
