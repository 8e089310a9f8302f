//! Save-pipeline orchestration (application-level).
//!
//! The pipeline is: validate the candidate against the store's current
//! contents, reject with the full violation set on any failure, persist on
//! success. Nothing is ever partially persisted; a rejected candidate leaves
//! the store untouched (apart from the validator's documented `retired`
//! normalization on the candidate object itself).

use std::sync::Arc;

use thiserror::Error;

use locus_attributes::{AttributeTypeRegistry, AttributeValidator};
use locus_core::{Entity, LocationId, Violations};
use locus_locations::{Location, LocationValidator, ValidateError};

use crate::store::{LocationStore, StoreError};

/// Save failure.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The candidate broke one or more rules; carries the full set.
    #[error("location failed validation: {0}")]
    Rejected(Violations),

    /// A validation collaborator failed (hard fault, not a rule violation).
    #[error(transparent)]
    Validate(#[from] ValidateError),

    /// Persisting the already-validated candidate failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Application service: validated persistence of locations.
///
/// Generic over the store (`S`, which backs both collaborator traits) and
/// the attribute validation capability (`A`), so tests and deployments can
/// swap either without touching the pipeline.
pub struct LocationService<S: ?Sized, A> {
    store: Arc<S>,
    validator: LocationValidator<Arc<S>, Arc<S>, A>,
}

impl<S, A> LocationService<S, A>
where
    S: LocationStore + AttributeTypeRegistry + ?Sized,
    A: AttributeValidator,
{
    pub fn new(store: Arc<S>, attribute_validator: A) -> Self {
        let validator = LocationValidator::new(
            Arc::clone(&store),
            Arc::clone(&store),
            attribute_validator,
        );
        Self { store, validator }
    }

    /// Validate `location` and persist it if clean.
    ///
    /// On rejection the store is untouched and the full violation set is
    /// returned; the candidate may have had its `retired` flag normalized
    /// (the validator's documented post-condition), so the caller can
    /// re-render it as-is.
    pub fn save(&self, location: &mut Location) -> Result<LocationId, SaveError> {
        let mut violations = Violations::new();
        self.validator.validate(Some(location), &mut violations)?;

        if !violations.is_empty() {
            tracing::warn!(
                "rejecting location {} with {} violation(s): {}",
                location.id(),
                violations.len(),
                violations
            );
            return Err(SaveError::Rejected(violations));
        }

        self.store.upsert(location.clone())?;
        tracing::debug!("saved location {} ({})", location.id(), location.name());
        Ok(*location.id())
    }
}
