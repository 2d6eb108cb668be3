//! In-process document store
//!
//! Documents are kept per collection in insertion order, which doubles as
//! store order for find results.

use crate::backend::matcher;
use crate::errors::StoreError;
use crate::traits::{DocumentBackend, UpdateOutcome};
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    failing_updates: std::sync::RwLock<Vec<Bson>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every update targeting `_id == id` fail
    pub fn fail_updates_for(&self, id: impl Into<Bson>) {
        if let Ok(mut failing) = self.failing_updates.write() {
            failing.push(id.into());
        }
    }

    pub fn clear_failures(&self) {
        if let Ok(mut failing) = self.failing_updates.write() {
            failing.clear();
        }
    }

    /// Number of documents physically present in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }

    fn update_should_fail(&self, filter: &Document) -> bool {
        let Some(id) = filter.get("_id") else {
            return false;
        };
        self.failing_updates
            .read()
            .map(|failing| failing.contains(id))
            .unwrap_or(false)
    }

    fn position(documents: &[Document], filter: &Document) -> Result<Option<usize>, StoreError> {
        for (index, document) in documents.iter().enumerate() {
            if matcher::matches(document, filter)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        let existing = document
            .get("_id")
            .filter(|id| **id != Bson::Null)
            .cloned();
        let (id, document) = match existing {
            Some(id) => (id, document),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                let mut with_id = Document::new();
                with_id.insert("_id", id.clone());
                for (key, value) in document {
                    if key != "_id" {
                        with_id.insert(key, value);
                    }
                }
                (id, with_id)
            }
        };

        if documents.iter().any(|existing| existing.get("_id") == Some(&id)) {
            return Err(StoreError::Backend(format!(
                "duplicate key in collection '{}': _id {}",
                collection, id
            )));
        }

        documents.push(document);
        Ok(id)
    }

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let mut found = Vec::new();
        for document in collections.get(collection).into_iter().flatten() {
            if matcher::matches(document, &filter)? {
                found.push(document.clone());
            }
        }
        Ok(found)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(None);
        };
        Ok(Self::position(documents, &filter)?.map(|index| documents[index].clone()))
    }

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        let mut count = 0;
        for document in collections.get(collection).into_iter().flatten() {
            if matcher::matches(document, &filter)? {
                count += 1;
            }
        }
        Ok(count)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        if self.update_should_fail(&filter) {
            return Err(StoreError::Backend(format!(
                "injected update failure in collection '{}'",
                collection
            )));
        }

        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(UpdateOutcome::default());
        };
        let Some(index) = Self::position(documents, &filter)? else {
            return Ok(UpdateOutcome::default());
        };

        let mut updated = documents[index].clone();
        matcher::apply_update(&mut updated, &update)?;
        let modified = u64::from(updated != documents[index]);
        documents[index] = updated;

        Ok(UpdateOutcome {
            matched: 1,
            modified,
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match Self::position(documents, &filter)? {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let mut doomed = Vec::with_capacity(documents.len());
        for document in documents.iter() {
            doomed.push(matcher::matches(document, &filter)?);
        }

        let mut flags = doomed.iter();
        documents.retain(|_| !flags.next().copied().unwrap_or(false));
        Ok(doomed.iter().filter(|d| **d).count() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[tokio::test]
    async fn test_insert_assigns_object_id_first() {
        let backend = MemoryBackend::new();
        let id = backend
            .insert_one("items", doc! { "name": "a" })
            .await
            .unwrap();
        assert!(matches!(id, Bson::ObjectId(_)));

        let stored = backend.find("items", doc! {}).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].keys().next().map(String::as_str), Some("_id"));
        assert_eq!(stored[0].get("_id"), Some(&id));
    }

    #[tokio::test]
    async fn test_insert_replaces_null_id() {
        let backend = MemoryBackend::new();
        let id = backend
            .insert_one("items", doc! { "_id": Bson::Null, "name": "a" })
            .await
            .unwrap();
        assert!(matches!(id, Bson::ObjectId(_)));
        assert_eq!(backend.len("items").await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let backend = MemoryBackend::new();
        backend.insert_one("items", doc! { "_id": 1 }).await.unwrap();
        let err = backend.insert_one("items", doc! { "_id": 1 }).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn test_find_preserves_insertion_order() {
        let backend = MemoryBackend::new();
        for n in 0..4 {
            backend
                .insert_one("items", doc! { "_id": n, "even": n % 2 == 0 })
                .await
                .unwrap();
        }
        let even = backend.find("items", doc! { "even": true }).await.unwrap();
        let ids: Vec<i32> = even.iter().map(|d| d.get_i32("_id").unwrap()).collect();
        assert_eq!(ids, vec![0, 2]);

        let first = backend.find_one("items", doc! { "even": false }).await.unwrap();
        assert_eq!(first.unwrap().get_i32("_id").unwrap(), 1);
        assert_eq!(backend.count("items", doc! {}).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_update_one_touches_first_match_only() {
        let backend = MemoryBackend::new();
        backend.insert_one("items", doc! { "_id": 1, "k": "x" }).await.unwrap();
        backend.insert_one("items", doc! { "_id": 2, "k": "x" }).await.unwrap();

        let outcome = backend
            .update_one("items", doc! { "k": "x" }, doc! { "$set": { "k": "y" } })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 1 });

        let remaining = backend.count("items", doc! { "k": "x" }).await.unwrap();
        assert_eq!(remaining, 1);

        let missing = backend
            .update_one("items", doc! { "_id": 9 }, doc! { "$set": { "k": "z" } })
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome::default());
    }

    #[tokio::test]
    async fn test_injected_update_failure() {
        let backend = MemoryBackend::new();
        backend.insert_one("items", doc! { "_id": 1 }).await.unwrap();
        backend.fail_updates_for(1);

        let err = backend
            .update_one("items", doc! { "_id": 1 }, doc! { "$set": { "k": 1 } })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));

        backend.clear_failures();
        backend
            .update_one("items", doc! { "_id": 1 }, doc! { "$set": { "k": 1 } })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_one_and_many() {
        let backend = MemoryBackend::new();
        for n in 0..5 {
            backend
                .insert_one("items", doc! { "_id": n, "group": n / 2 })
                .await
                .unwrap();
        }

        assert_eq!(backend.delete_one("items", doc! { "group": 0 }).await.unwrap(), 1);
        assert_eq!(backend.delete_many("items", doc! { "group": 1 }).await.unwrap(), 2);
        assert_eq!(backend.delete_many("missing", doc! {}).await.unwrap(), 0);
        assert_eq!(backend.len("items").await, 2);
    }
}
