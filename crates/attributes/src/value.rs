//! Attribute values and the seam through which entities expose them.

use serde::{Deserialize, Serialize};

use locus_core::AttributeTypeId;

/// One declared attribute value on an entity: which type, and the raw value.
///
/// Values are carried as JSON so the open-ended datatype universe needs no
/// per-type code. Conformance to the declared datatype is checked at
/// validation time, not at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub type_id: AttributeTypeId,
    pub value: serde_json::Value,
}

impl AttributeValue {
    pub fn new(type_id: AttributeTypeId, value: serde_json::Value) -> Self {
        Self { type_id, value }
    }
}

/// An entity that carries custom attributes.
///
/// Implementors only expose their declared values; interpreting them against
/// the registry's type definitions is the validator's job.
pub trait Customizable {
    fn attribute_values(&self) -> &[AttributeValue];
}
