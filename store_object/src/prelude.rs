//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::{DocumentBackend, DocumentCollection, SoftDeletable};

// Error types
pub use crate::errors::StoreError;

// Repository and backends
pub use crate::backend::{MemoryBackend, MongoBackend};
pub use crate::generic_store::{EntityStore, SoftDeleteRepository};

// Metadata and results
pub use crate::metadata::{ChangeSummary, SoftDeleteMetadata};

// Selectors
pub use crate::selector::{Selector, SelectorFilter};

// Validation
pub use crate::validation::{ValidatedCollectionName, ValidationError};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use bson::{doc, oid::ObjectId, Bson, DateTime, Document};
pub use serde::{Deserialize, Serialize};
