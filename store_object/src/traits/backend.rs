//! Trait definitions
//!
//! The primitives the repository needs from a document store.

use crate::errors::StoreError;
use async_trait::async_trait;
use bson::{Bson, Document};
use std::fmt::Debug;

/// Counters reported by a single-document update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Document store primitives
///
/// Implementations pass store errors through untouched; soft-delete rules live
/// entirely in the repository.
#[async_trait]
pub trait DocumentBackend: Send + Sync + Debug {
    /// Insert a new document and return its `_id`
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError>;

    /// All documents matching `filter`, in store order
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError>;

    /// First document matching `filter` in store order
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    /// Apply an update-operator document to the first match
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete the first match, returning the number deleted (0 or 1)
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    /// Delete every match, returning the number deleted
    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    /// Round-trip to the store
    async fn ping(&self) -> Result<(), StoreError>;
}
