//! Location storage: the writable store trait and its in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use locus_attributes::{AttributeTypeDefinition, AttributeTypeRegistry, RegistryError};
use locus_core::{Entity, LocationId};
use locus_locations::{Location, LocationLookup, LookupError};

/// Store write failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("location store unavailable: {0}")]
    Unavailable(String),
}

/// Writable location store.
///
/// The read side is the domain's [`LocationLookup`] collaborator; this trait
/// adds the write operation the save pipeline needs.
pub trait LocationStore: LocationLookup {
    fn upsert(&self, location: Location) -> Result<(), StoreError>;
}

impl<S> LocationStore for Arc<S>
where
    S: LocationStore + ?Sized,
{
    fn upsert(&self, location: Location) -> Result<(), StoreError> {
        (**self).upsert(location)
    }
}

/// In-memory location store and attribute-type registry.
///
/// Intended for tests/dev. Name lookup is exact-match and case-sensitive,
/// with no trimming; deployments wanting locale-aware or normalized matching
/// swap in a store that owns those semantics.
#[derive(Debug, Default)]
pub struct InMemoryLocationStore {
    locations: RwLock<HashMap<LocationId, Location>>,
    attribute_types: RwLock<Vec<AttributeTypeDefinition>>,
}

impl InMemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: LocationId) -> Option<Location> {
        let map = self.locations.read().ok()?;
        map.get(&id).cloned()
    }

    pub fn remove(&self, id: LocationId) -> Option<Location> {
        let mut map = self.locations.write().ok()?;
        map.remove(&id)
    }

    pub fn list(&self) -> Vec<Location> {
        match self.locations.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    /// Register an attribute type definition; registry order is definition
    /// order.
    pub fn define_attribute_type(&self, definition: AttributeTypeDefinition) {
        if let Ok(mut types) = self.attribute_types.write() {
            types.push(definition);
        }
    }
}

impl LocationLookup for InMemoryLocationStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Location>, LookupError> {
        let map = self
            .locations
            .read()
            .map_err(|_| LookupError::Unavailable("lock poisoned".to_string()))?;
        Ok(map.values().find(|l| l.name() == name).cloned())
    }

    fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, LookupError> {
        let map = self
            .locations
            .read()
            .map_err(|_| LookupError::Unavailable("lock poisoned".to_string()))?;
        Ok(map.get(&id).cloned())
    }
}

impl AttributeTypeRegistry for InMemoryLocationStore {
    fn list_all(&self) -> Result<Vec<AttributeTypeDefinition>, RegistryError> {
        let types = self
            .attribute_types
            .read()
            .map_err(|_| RegistryError::Unavailable("lock poisoned".to_string()))?;
        Ok(types.clone())
    }
}

impl LocationStore for InMemoryLocationStore {
    fn upsert(&self, location: Location) -> Result<(), StoreError> {
        let mut map = self
            .locations
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        map.insert(*location.id(), location);
        Ok(())
    }
}
