//! Location entity - a place in a containment hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use locus_attributes::{AttributeValue, Customizable};
use locus_core::{Entity, LocationId};

/// Entity: a physical or administrative place (site, building, ward, bed).
///
/// Locations form a tree through `parent` back-references; the link is a
/// non-owning id, resolved through the store when the chain needs walking.
/// Retired locations are archival: they stay addressable and keep their
/// name, but no longer count as active records.
///
/// Instances are constructed and mutated freely (the form-binding layer
/// writes whatever the user submitted); invariants are enforced by
/// validation before persistence, never assumed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    name: String,
    description: Option<String>,
    parent: Option<LocationId>,
    retired: bool,
    retire_reason: Option<String>,
    date_retired: Option<DateTime<Utc>>,
    attributes: Vec<AttributeValue>,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            parent: None,
            retired: false,
            retire_reason: None,
            date_retired: None,
            attributes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parent(&self) -> Option<LocationId> {
        self.parent
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub fn retire_reason(&self) -> Option<&str> {
        self.retire_reason.as_deref()
    }

    pub fn date_retired(&self) -> Option<DateTime<Utc>> {
        self.date_retired
    }

    pub fn attributes(&self) -> &[AttributeValue] {
        &self.attributes
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_parent(&mut self, parent: Option<LocationId>) {
        self.parent = parent;
    }

    /// Raw flag setter, used by form binding and by validation's corrective
    /// normalization. Does not touch the reason or timestamp.
    pub fn set_retired(&mut self, retired: bool) {
        self.retired = retired;
    }

    pub fn set_retire_reason(&mut self, reason: Option<String>) {
        self.retire_reason = reason;
    }

    /// Retire with a reason, stamping the retirement time.
    pub fn retire(&mut self, reason: impl Into<String>) {
        self.retired = true;
        self.retire_reason = Some(reason.into());
        self.date_retired = Some(Utc::now());
    }

    /// Bring a retired location back into active use.
    pub fn unretire(&mut self) {
        self.retired = false;
        self.retire_reason = None;
        self.date_retired = None;
    }

    pub fn add_attribute(&mut self, value: AttributeValue) {
        self.attributes.push(value);
    }
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Customizable for Location {
    fn attribute_values(&self) -> &[AttributeValue] {
        &self.attributes
    }
}
