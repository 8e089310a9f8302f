//! Pre-persistence validation of [`Location`] entities.

use std::collections::HashSet;

use thiserror::Error;

use locus_attributes::{AttributeTypeRegistry, AttributeValidator, RegistryError};
use locus_core::{Entity, ViolationCode, Violations};

use crate::location::Location;
use crate::lookup::{LocationLookup, LookupError};

/// Maximum stored length of a location name.
pub const NAME_MAX_LEN: usize = 255;

/// Maximum stored length of a location description.
pub const DESCRIPTION_MAX_LEN: usize = 255;

/// Hard (non-violation) failure during a validation pass.
///
/// Rule violations never surface here - they go to the [`Violations`]
/// accumulator. This error means a collaborator itself failed.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("location lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("attribute type registry failed: {0}")]
    Registry(#[from] RegistryError),
}

/// Validates a candidate [`Location`] before it is persisted.
///
/// Collaborators are injected at construction:
///
/// - `L`: lookup used for the active-name uniqueness check and for resolving
///   parent ids during the cycle walk
/// - `R`: registry supplying the full set of attribute type definitions
/// - `A`: the customizable-attribute validation capability
///
/// A pass runs four checks in order - field rules, name uniqueness, parent
/// cycle, attribute delegation - accumulating every violation it finds; an
/// earlier failure never suppresses a later check. The one exception is an
/// absent candidate, which is reported once and skips the other three
/// checks (they are undefined without an object).
pub struct LocationValidator<L, R, A> {
    lookup: L,
    registry: R,
    attribute_validator: A,
}

impl<L, R, A> LocationValidator<L, R, A>
where
    L: LocationLookup,
    R: AttributeTypeRegistry,
    A: AttributeValidator,
{
    pub fn new(lookup: L, registry: R, attribute_validator: A) -> Self {
        Self {
            lookup,
            registry,
            attribute_validator,
        }
    }

    /// Run all checks against `candidate`, appending to `violations`.
    ///
    /// Post-condition: when the candidate is retired without a non-blank
    /// retire reason, its `retired` flag is normalized back to `false` (in
    /// addition to the recorded violation), so a re-rendered form never
    /// shows a retired record with no reason.
    ///
    /// `Err` means a collaborator failed, not that the candidate is invalid;
    /// the accumulator may then hold a partial set.
    pub fn validate(
        &self,
        candidate: Option<&mut Location>,
        violations: &mut Violations,
    ) -> Result<(), ValidateError> {
        let Some(location) = candidate else {
            violations.reject("location", ViolationCode::MissingEntity);
            return Ok(());
        };

        self.check_fields(location, violations);
        self.check_name_uniqueness(location, violations)?;
        self.check_parent_chain(location, violations)?;

        let definitions = self.registry.list_all()?;
        self.attribute_validator
            .validate_attributes(location, &definitions, violations);

        Ok(())
    }

    /// Required fields, length caps, and the retired/reason coupling.
    fn check_fields(&self, location: &mut Location, violations: &mut Violations) {
        if location.name().trim().is_empty() {
            violations.reject("name", ViolationCode::Missing);
        } else if location.name().len() > NAME_MAX_LEN {
            violations.reject("name", ViolationCode::TooLong);
        }

        if let Some(description) = location.description() {
            if description.len() > DESCRIPTION_MAX_LEN {
                violations.reject("description", ViolationCode::TooLong);
            }
        }

        let reason_blank = location
            .retire_reason()
            .is_none_or(|r| r.trim().is_empty());
        if location.is_retired() && reason_blank {
            // Normalize so the caller re-renders a consistent, not-retired
            // state alongside the rejection.
            location.set_retired(false);
            violations.reject("retire_reason", ViolationCode::Missing);
        }
    }

    /// No two active (non-retired) locations may share a name.
    ///
    /// Retired records are archival and may share a name with an active one;
    /// a match with the candidate's own id is the record being edited.
    fn check_name_uniqueness(
        &self,
        location: &Location,
        violations: &mut Violations,
    ) -> Result<(), ValidateError> {
        let Some(existing) = self.lookup.find_by_name(location.name())? else {
            return Ok(());
        };
        if !existing.is_retired() && existing.id() != location.id() {
            violations.reject("name", ViolationCode::Duplicate);
        }
        Ok(())
    }

    /// The parent chain must not loop back onto the candidate.
    ///
    /// The walk follows parent ids upward and compares each ancestor id to
    /// the candidate's. A dangling parent id ends the walk without a
    /// violation (referential integrity is the store's concern), as does an
    /// ancestor-level cycle that skips the candidate - the `seen` set exists
    /// only so a corrupted graph cannot hang the walk; that cycle is flagged
    /// when its own member is validated.
    fn check_parent_chain(
        &self,
        location: &Location,
        violations: &mut Violations,
    ) -> Result<(), ValidateError> {
        let origin = *location.id();
        let mut seen = HashSet::new();
        let mut next = location.parent();

        while let Some(parent_id) = next {
            if parent_id == origin {
                violations.reject("parent_location", ViolationCode::ParentCycle);
                break;
            }
            if !seen.insert(parent_id) {
                break;
            }
            next = match self.lookup.find_by_id(parent_id)? {
                Some(parent) => parent.parent(),
                None => None,
            };
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use serde_json::json;

    use locus_attributes::{
        AttributeDatatype, AttributeTypeDefinition, AttributeValue, DatatypeAttributeValidator,
    };
    use locus_core::{AttributeTypeId, LocationId};

    use super::*;

    /// Test double backing both collaborator traits.
    #[derive(Default)]
    struct StubStore {
        by_id: HashMap<LocationId, Location>,
        types: Vec<AttributeTypeDefinition>,
    }

    impl StubStore {
        fn with_locations(locations: Vec<Location>) -> Self {
            Self {
                by_id: locations.into_iter().map(|l| (*l.id(), l)).collect(),
                types: Vec::new(),
            }
        }
    }

    impl LocationLookup for StubStore {
        fn find_by_name(&self, name: &str) -> Result<Option<Location>, LookupError> {
            Ok(self.by_id.values().find(|l| l.name() == name).cloned())
        }

        fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, LookupError> {
            Ok(self.by_id.get(&id).cloned())
        }
    }

    impl AttributeTypeRegistry for StubStore {
        fn list_all(&self) -> Result<Vec<AttributeTypeDefinition>, RegistryError> {
            Ok(self.types.clone())
        }
    }

    /// Collaborator that always fails, for hard-fault propagation tests.
    struct BrokenStore;

    impl LocationLookup for BrokenStore {
        fn find_by_name(&self, _name: &str) -> Result<Option<Location>, LookupError> {
            Err(LookupError::Unavailable("backend down".into()))
        }

        fn find_by_id(&self, _id: LocationId) -> Result<Option<Location>, LookupError> {
            Err(LookupError::Unavailable("backend down".into()))
        }
    }

    impl AttributeTypeRegistry for BrokenStore {
        fn list_all(&self) -> Result<Vec<AttributeTypeDefinition>, RegistryError> {
            Err(RegistryError::Unavailable("backend down".into()))
        }
    }

    fn validator(
        store: StubStore,
    ) -> LocationValidator<Arc<StubStore>, Arc<StubStore>, DatatypeAttributeValidator> {
        let store = Arc::new(store);
        LocationValidator::new(
            Arc::clone(&store),
            Arc::clone(&store),
            DatatypeAttributeValidator::new(),
        )
    }

    fn validate_one(
        store: StubStore,
        location: &mut Location,
    ) -> Violations {
        let mut violations = Violations::new();
        validator(store)
            .validate(Some(location), &mut violations)
            .unwrap();
        violations
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut location = Location::new(LocationId::new(), "");
        let violations = validate_one(StubStore::default(), &mut location);

        assert_eq!(violations.len(), 1);
        assert!(violations.contains("name", ViolationCode::Missing));
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        let mut location = Location::new(LocationId::new(), "   \t ");
        let violations = validate_one(StubStore::default(), &mut location);

        assert!(violations.contains("name", ViolationCode::Missing));
    }

    #[test]
    fn over_long_name_is_rejected() {
        let mut location = Location::new(LocationId::new(), "x".repeat(NAME_MAX_LEN + 1));
        let violations = validate_one(StubStore::default(), &mut location);

        assert_eq!(violations.len(), 1);
        assert!(violations.contains("name", ViolationCode::TooLong));
    }

    #[test]
    fn over_long_description_is_rejected() {
        let mut location = Location::new(LocationId::new(), "Clinic A");
        location.set_description(Some("d".repeat(DESCRIPTION_MAX_LEN + 1)));
        let violations = validate_one(StubStore::default(), &mut location);

        assert_eq!(violations.len(), 1);
        assert!(violations.contains("description", ViolationCode::TooLong));
    }

    #[test]
    fn retired_without_reason_is_rejected_and_normalized() {
        let mut location = Location::new(LocationId::new(), "Clinic A");
        location.set_retired(true);

        let violations = validate_one(StubStore::default(), &mut location);

        assert!(violations.contains("retire_reason", ViolationCode::Missing));
        assert!(!location.is_retired());
    }

    #[test]
    fn retired_with_blank_reason_is_rejected_and_normalized() {
        let mut location = Location::new(LocationId::new(), "Clinic A");
        location.set_retired(true);
        location.set_retire_reason(Some("  ".into()));

        let violations = validate_one(StubStore::default(), &mut location);

        assert!(violations.contains("retire_reason", ViolationCode::Missing));
        assert!(!location.is_retired());
    }

    #[test]
    fn retired_with_reason_passes_and_stays_retired() {
        let mut location = Location::new(LocationId::new(), "Clinic A");
        location.retire("closed for renovation");

        let violations = validate_one(StubStore::default(), &mut location);

        assert!(violations.is_empty());
        assert!(location.is_retired());
    }

    #[test]
    fn normalization_happens_even_when_other_checks_fail() {
        // Blank name AND retired-without-reason: both violations are
        // reported and the flag is still normalized.
        let mut location = Location::new(LocationId::new(), "");
        location.set_retired(true);

        let violations = validate_one(StubStore::default(), &mut location);

        assert_eq!(violations.len(), 2);
        assert!(violations.contains("name", ViolationCode::Missing));
        assert!(violations.contains("retire_reason", ViolationCode::Missing));
        assert!(!location.is_retired());
    }

    #[test]
    fn duplicate_active_name_is_rejected() {
        let existing = Location::new(LocationId::new(), "Clinic A");
        let mut candidate = Location::new(LocationId::new(), "Clinic A");

        let violations = validate_one(StubStore::with_locations(vec![existing]), &mut candidate);

        assert_eq!(violations.len(), 1);
        assert!(violations.contains("name", ViolationCode::Duplicate));
    }

    #[test]
    fn name_match_on_self_is_not_a_duplicate() {
        let id = LocationId::new();
        let stored = Location::new(id, "Clinic A");
        let mut candidate = Location::new(id, "Clinic A");

        let violations = validate_one(StubStore::with_locations(vec![stored]), &mut candidate);

        assert!(violations.is_empty());
    }

    #[test]
    fn name_match_on_retired_record_is_not_a_duplicate() {
        let mut archived = Location::new(LocationId::new(), "Clinic A");
        archived.retire("renamed and reopened");
        let mut candidate = Location::new(LocationId::new(), "Clinic A");

        let violations = validate_one(StubStore::with_locations(vec![archived]), &mut candidate);

        assert!(violations.is_empty());
    }

    #[test]
    fn parent_chain_looping_to_candidate_is_rejected() {
        // L -> P1 -> P2 -> L
        let l_id = LocationId::new();
        let p1_id = LocationId::new();
        let p2_id = LocationId::new();

        let mut candidate = Location::new(l_id, "L");
        candidate.set_parent(Some(p1_id));
        let mut p1 = Location::new(p1_id, "P1");
        p1.set_parent(Some(p2_id));
        let mut p2 = Location::new(p2_id, "P2");
        p2.set_parent(Some(l_id));

        let violations = validate_one(StubStore::with_locations(vec![p1, p2]), &mut candidate);

        assert_eq!(violations.len(), 1);
        assert!(violations.contains("parent_location", ViolationCode::ParentCycle));
    }

    #[test]
    fn direct_self_parent_is_rejected() {
        let id = LocationId::new();
        let mut candidate = Location::new(id, "L");
        candidate.set_parent(Some(id));

        let violations = validate_one(StubStore::default(), &mut candidate);

        assert!(violations.contains("parent_location", ViolationCode::ParentCycle));
    }

    #[test]
    fn acyclic_chain_passes() {
        let root_id = LocationId::new();
        let mid_id = LocationId::new();

        let root = Location::new(root_id, "Hospital");
        let mut mid = Location::new(mid_id, "Wing B");
        mid.set_parent(Some(root_id));
        let mut candidate = Location::new(LocationId::new(), "Ward 3");
        candidate.set_parent(Some(mid_id));

        let violations = validate_one(StubStore::with_locations(vec![root, mid]), &mut candidate);

        assert!(violations.is_empty());
    }

    #[test]
    fn dangling_parent_id_is_not_a_violation() {
        let mut candidate = Location::new(LocationId::new(), "Ward 3");
        candidate.set_parent(Some(LocationId::new()));

        let violations = validate_one(StubStore::default(), &mut candidate);

        assert!(violations.is_empty());
    }

    #[test]
    fn ancestor_cycle_not_through_candidate_terminates_without_violation() {
        // L -> P1 -> P2 -> P1: corrupted upstream, but the candidate is not
        // part of the loop. The walk must stop, and stay silent.
        let p1_id = LocationId::new();
        let p2_id = LocationId::new();

        let mut p1 = Location::new(p1_id, "P1");
        p1.set_parent(Some(p2_id));
        let mut p2 = Location::new(p2_id, "P2");
        p2.set_parent(Some(p1_id));
        let mut candidate = Location::new(LocationId::new(), "L");
        candidate.set_parent(Some(p1_id));

        let violations = validate_one(StubStore::with_locations(vec![p1, p2]), &mut candidate);

        assert!(violations.is_empty());
    }

    #[test]
    fn absent_candidate_reports_once_and_skips_everything_else() {
        let mut violations = Violations::new();
        validator(StubStore::default())
            .validate(None, &mut violations)
            .unwrap();

        assert_eq!(violations.len(), 1);
        assert!(violations.contains("location", ViolationCode::MissingEntity));
    }

    #[test]
    fn absent_candidate_never_touches_collaborators() {
        // BrokenStore errors on every call; None must still succeed.
        let validator = LocationValidator::new(
            Arc::new(BrokenStore),
            Arc::new(BrokenStore),
            DatatypeAttributeValidator::new(),
        );

        let mut violations = Violations::new();
        validator.validate(None, &mut violations).unwrap();

        assert!(violations.contains("location", ViolationCode::MissingEntity));
    }

    #[test]
    fn attribute_violations_are_appended_through_the_delegate() {
        let required = AttributeTypeDefinition::new(
            AttributeTypeId::new(),
            "operating-hours",
            AttributeDatatype::Text,
        )
        .required();
        let store = StubStore {
            by_id: HashMap::new(),
            types: vec![required],
        };

        let mut candidate = Location::new(LocationId::new(), "Clinic A");
        let violations = validate_one(store, &mut candidate);

        assert_eq!(violations.len(), 1);
        assert!(violations.contains("attributes.operating-hours", ViolationCode::Missing));
    }

    #[test]
    fn attribute_check_runs_even_when_earlier_checks_failed() {
        let bed_count = AttributeTypeDefinition::new(
            AttributeTypeId::new(),
            "bed-count",
            AttributeDatatype::Integer,
        );
        let mut candidate = Location::new(LocationId::new(), "");
        candidate.add_attribute(AttributeValue::new(bed_count.id, json!("many")));

        let store = StubStore {
            by_id: HashMap::new(),
            types: vec![bed_count],
        };
        let violations = validate_one(store, &mut candidate);

        assert_eq!(violations.len(), 2);
        assert!(violations.contains("name", ViolationCode::Missing));
        assert!(violations.contains("attributes.bed-count", ViolationCode::InvalidValue));
    }

    #[test]
    fn valid_location_revalidates_cleanly() {
        let mut location = Location::new(LocationId::new(), "Clinic A");

        let first = validate_one(StubStore::default(), &mut location);
        let second = validate_one(StubStore::default(), &mut location);

        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn lookup_fault_propagates_as_hard_error() {
        let validator = LocationValidator::new(
            Arc::new(BrokenStore),
            Arc::new(BrokenStore),
            DatatypeAttributeValidator::new(),
        );

        let mut location = Location::new(LocationId::new(), "Clinic A");
        let mut violations = Violations::new();
        let err = validator
            .validate(Some(&mut location), &mut violations)
            .unwrap_err();

        match err {
            ValidateError::Lookup(_) => {}
            _ => panic!("Expected Lookup error"),
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: whitespace-only names always produce a `name` violation.
            #[test]
            fn blank_names_are_always_rejected(name in "[ \\t]{0,12}") {
                let mut location = Location::new(LocationId::new(), name);
                let violations = validate_one(StubStore::default(), &mut location);

                prop_assert!(violations.contains("name", ViolationCode::Missing));
            }

            /// Property: reasonable non-blank names never trip the name checks.
            #[test]
            fn non_blank_names_pass_the_field_check(
                name in "[A-Za-z][A-Za-z0-9 ]{0,60}"
            ) {
                let mut location = Location::new(LocationId::new(), name);
                let violations = validate_one(StubStore::default(), &mut location);

                prop_assert!(!violations.contains("name", ViolationCode::Missing));
                prop_assert!(!violations.contains("name", ViolationCode::TooLong));
            }

            /// Property: straight-line parent chains of any depth never
            /// report a cycle.
            #[test]
            fn acyclic_chains_never_report_a_cycle(depth in 1usize..24) {
                let ids: Vec<LocationId> = (0..depth).map(|_| LocationId::new()).collect();

                let mut chain = Vec::new();
                for (i, id) in ids.iter().enumerate() {
                    let mut ancestor = Location::new(*id, format!("A{i}"));
                    if let Some(parent) = ids.get(i + 1) {
                        ancestor.set_parent(Some(*parent));
                    }
                    chain.push(ancestor);
                }

                let mut candidate = Location::new(LocationId::new(), "L");
                candidate.set_parent(Some(ids[0]));

                let violations = validate_one(StubStore::with_locations(chain), &mut candidate);
                prop_assert!(!violations.contains("parent_location", ViolationCode::ParentCycle));
            }
        }
    }
}
