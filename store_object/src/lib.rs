//! Store Object - soft-delete repository core for Mongohaus
//!
//! This crate provides the entity capability traits, the document backend
//! seam with its MongoDB and in-memory implementations, selectors and the
//! repository that enforces soft-delete semantics on top of them.

extern crate self as store_object;

pub mod backend;
pub mod errors;
pub mod generic_store;
pub mod metadata;
pub mod prelude;
pub mod selector;
pub mod traits;
pub mod validation;

pub use backend::{MemoryBackend, MongoBackend};
pub use errors::StoreError;
pub use generic_store::{EntityStore, SoftDeleteRepository};
pub use metadata::{ChangeSummary, SoftDeleteMetadata, DEFAULT_METADATA_KEY};
pub use selector::{Selector, SelectorFilter};
pub use traits::{id_from_bson, id_to_bson, DocumentBackend, DocumentCollection, SoftDeletable, UpdateOutcome};
pub use validation::{ValidatedCollectionName, ValidationError};

// Used by code generated from document-derive
pub use bson;
pub use mongodb;
pub use serde;
