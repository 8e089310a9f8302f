//! Location lookup collaborator.

use std::sync::Arc;

use thiserror::Error;

use locus_core::LocationId;

use crate::location::Location;

/// Lookup failure.
///
/// These are infrastructure faults, not rule violations; they propagate as
/// hard errors to the caller.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("location lookup unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to persisted locations.
///
/// `find_by_name` is an exact-match query; whether the match is
/// case-sensitive or trims whitespace is owned by the implementation, and
/// callers must not assume either. An empty name is a legal query and
/// returns no match.
pub trait LocationLookup: Send + Sync {
    fn find_by_name(&self, name: &str) -> Result<Option<Location>, LookupError>;

    fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, LookupError>;
}

impl<L> LocationLookup for Arc<L>
where
    L: LocationLookup + ?Sized,
{
    fn find_by_name(&self, name: &str) -> Result<Option<Location>, LookupError> {
        (**self).find_by_name(name)
    }

    fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, LookupError> {
        (**self).find_by_id(id)
    }
}
