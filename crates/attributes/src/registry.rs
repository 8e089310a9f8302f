//! Attribute type registry collaborator.

use std::sync::Arc;

use thiserror::Error;

use crate::definition::AttributeTypeDefinition;

/// Registry lookup failure.
///
/// These are infrastructure faults (backend unreachable, storage corrupt),
/// not rule violations; they propagate as hard errors to the caller.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("attribute type registry unavailable: {0}")]
    Unavailable(String),
}

/// Source of the full, ordered set of known attribute type definitions.
///
/// The registry is configuration storage owned by a collaborator; this crate
/// only reads it. Ordering is the registry's, and is preserved by consumers
/// so violations render in a stable order.
pub trait AttributeTypeRegistry: Send + Sync {
    fn list_all(&self) -> Result<Vec<AttributeTypeDefinition>, RegistryError>;
}

impl<R> AttributeTypeRegistry for Arc<R>
where
    R: AttributeTypeRegistry + ?Sized,
{
    fn list_all(&self) -> Result<Vec<AttributeTypeDefinition>, RegistryError> {
        (**self).list_all()
    }
}
