//! Field-tagged rule violations and their accumulator.
//!
//! Business-rule failures are **reported, not thrown**: a validation pass
//! appends every violation it finds to a [`Violations`] sink and the caller
//! decides what to do with the full set. Hard faults (a collaborator being
//! unavailable) stay on the `Result` channel instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// A required value is absent or blank.
    Missing,
    /// A value exceeds its maximum length.
    TooLong,
    /// Another active record already claims the value.
    Duplicate,
    /// The parent chain loops back onto the record itself.
    ParentCycle,
    /// The candidate object itself is absent.
    MissingEntity,
    /// A value does not conform to its declared datatype.
    InvalidValue,
    /// More values were supplied than the type allows.
    TooMany,
}

impl ViolationCode {
    /// Stable string form for logs and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::TooLong => "too_long",
            Self::Duplicate => "duplicate",
            Self::ParentCycle => "parent_cycle",
            Self::MissingEntity => "missing_entity",
            Self::InvalidValue => "invalid_value",
            Self::TooMany => "too_many",
        }
    }
}

impl core::fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected field: which field, and the coded reason.
///
/// The field name is a path (`"name"`, `"parent_location"`,
/// `"attributes.operating-hours"`), not display text. Mapping codes to
/// human-readable messages belongs to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {code}")]
pub struct Violation {
    pub field: String,
    pub code: ViolationCode,
}

impl Violation {
    pub fn new(field: impl Into<String>, code: ViolationCode) -> Self {
        Self {
            field: field.into(),
            code,
        }
    }
}

/// Accumulator for violations found in a single validation pass.
///
/// Checks append and keep going; nothing short-circuits. Order of appends is
/// preserved so callers can render violations in check order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violations {
    items: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against a field.
    pub fn reject(&mut self, field: impl Into<String>, code: ViolationCode) {
        self.items.push(Violation::new(field, code));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether a specific field/code pair was recorded.
    pub fn contains(&self, field: &str, code: ViolationCode) -> bool {
        self.items
            .iter()
            .any(|v| v.field == field && v.code == code)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Violation> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = core::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl core::fmt::Display for Violations {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for v in &self.items {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
            first = false;
        }
        Ok(())
    }
}
