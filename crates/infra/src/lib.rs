//! Infrastructure layer: collaborator implementations and the save pipeline.
//!
//! The domain crates define what a valid location is; this crate supplies
//! the pieces around that - a store backing the lookup/registry collaborator
//! traits, and the validate-then-persist orchestration a caller actually
//! invokes.

pub mod service;
pub mod store;

pub use service::{LocationService, SaveError};
pub use store::{InMemoryLocationStore, LocationStore, StoreError};
