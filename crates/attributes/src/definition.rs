//! Attribute type definitions: the externally-configured shape of a custom
//! attribute.

use serde::{Deserialize, Serialize};

use locus_core::{AttributeTypeId, ValueObject};

/// Datatype a custom attribute value must conform to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeDatatype {
    /// Free text.
    Text,
    /// Whole number.
    Integer,
    /// True/false flag.
    Boolean,
    /// Calendar date, ISO-8601 (`YYYY-MM-DD`).
    Date,
}

impl AttributeDatatype {
    /// Whether a raw JSON value conforms to this datatype.
    pub fn accepts(&self, value: &serde_json::Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Date => value
                .as_str()
                .is_some_and(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()),
        }
    }

    /// Stable string form for logs and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

impl core::fmt::Display for AttributeDatatype {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of one custom attribute type.
///
/// Definitions are configuration rows owned by an external registry. The
/// cardinality bounds follow the usual min/max-occurs convention:
/// `min_occurs > 0` makes the attribute required, `max_occurs: None` means
/// unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTypeDefinition {
    pub id: AttributeTypeId,
    pub name: String,
    pub datatype: AttributeDatatype,
    pub min_occurs: u32,
    pub max_occurs: Option<u32>,
}

impl AttributeTypeDefinition {
    /// Optional, unbounded attribute type.
    pub fn new(id: AttributeTypeId, name: impl Into<String>, datatype: AttributeDatatype) -> Self {
        Self {
            id,
            name: name.into(),
            datatype,
            min_occurs: 0,
            max_occurs: None,
        }
    }

    /// Require at least one value of this type.
    pub fn required(mut self) -> Self {
        self.min_occurs = 1;
        self
    }

    /// Cap the number of values of this type.
    pub fn with_max_occurs(mut self, max: u32) -> Self {
        self.max_occurs = Some(max);
        self
    }

    /// Whether at least one value of this type must be present.
    pub fn is_required(&self) -> bool {
        self.min_occurs > 0
    }
}

impl ValueObject for AttributeTypeDefinition {}
