//! Soft-delete operations
//!
//! Reads only ever see live documents; `remove` and `remove_all` stamp the
//! deletion timestamp, the `_hard` variants physically delete.

use super::core::SoftDeleteRepository;
use crate::errors::StoreError;
use crate::metadata::{ChangeSummary, DELETED_AT_FIELD, UPDATED_AT_FIELD};
use crate::selector::{path, Selector};
use crate::traits::{DocumentBackend, SoftDeletable};
use bson::{doc, Bson, DateTime, Document};
use signal_system::{DocumentEvent, EventType};

/// Short human-readable form of a document identifier
pub(crate) fn id_label(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `$set` body for an update: every top-level field except `_id` and the
/// metadata, plus the fresh `updated_at`
fn field_patch<T: SoftDeletable>(document: Document, updated_at: DateTime) -> Document {
    let mut patch = Document::new();
    for (key, value) in document {
        let is_metadata = match T::metadata_key() {
            Some(metadata_key) => key == metadata_key,
            None => key == UPDATED_AT_FIELD || key == DELETED_AT_FIELD,
        };
        if key == "_id" || is_metadata {
            continue;
        }
        patch.insert(key, value);
    }
    patch.insert(T::metadata_path(UPDATED_AT_FIELD), updated_at);
    patch
}

fn into_selector(selector: impl Into<Selector>) -> Selector {
    selector.into()
}

fn stamp_deleted(deleted_path: &str) -> Document {
    let mut set = Document::new();
    set.insert(deleted_path, DateTime::now());
    doc! { "$set": set }
}

impl<B: DocumentBackend> SoftDeleteRepository<B> {
    /// Persist a new entity
    ///
    /// Stamps `updated_at` on the caller's value and writes back the
    /// store-assigned identifier when the entity had none.
    pub async fn insert<T: SoftDeletable>(
        &self,
        entity: &mut T,
        collection: &str,
    ) -> Result<Bson, StoreError> {
        let collection = Self::collection(collection)?;
        entity.metadata_mut().touch();

        let mut document = bson::to_document(entity)?;
        if matches!(document.get("_id"), Some(Bson::Null)) {
            document.remove("_id");
        }

        let id = self.backend.insert_one(collection.as_str(), document).await?;
        if entity.id().is_none() {
            entity.set_id(id.clone())?;
        }

        tracing::debug!("[INSERT] Collection: {}, id: {}", collection, id);
        self.emit_signal(
            DocumentEvent::new(EventType::Insert, collection.as_str()).with_document_id(id_label(&id)),
        );

        Ok(id)
    }

    /// First live document matching `selector`, in store order
    pub async fn find<T: SoftDeletable>(
        &self,
        selector: impl Into<Selector>,
        collection: &str,
    ) -> Result<T, StoreError> {
        let collection = Self::collection(collection)?;
        let filter = into_selector(selector)
            .live(&T::metadata_path(DELETED_AT_FIELD))
            .to_document();

        tracing::debug!("[FIND] Collection: {}, filter: {}", collection, filter);
        let found = self.backend.find_one(collection.as_str(), filter).await?;

        match found {
            Some(document) => {
                let entity: T = bson::from_document(document)?;
                if entity.is_live() {
                    Ok(entity)
                } else {
                    Err(StoreError::not_found(collection.as_str()))
                }
            }
            None => Err(StoreError::not_found(collection.as_str())),
        }
    }

    /// Every live document matching `selector`, in store order
    ///
    /// An empty result is reported as `NotFound`.
    pub async fn find_all<T: SoftDeletable>(
        &self,
        selector: impl Into<Selector>,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        let collection = Self::collection(collection)?;
        let filter = into_selector(selector)
            .live(&T::metadata_path(DELETED_AT_FIELD))
            .to_document();

        tracing::debug!("[FIND_ALL] Collection: {}, filter: {}", collection, filter);
        let documents = self.backend.find(collection.as_str(), filter).await?;

        let mut live = Vec::with_capacity(documents.len());
        for document in documents {
            let entity: T = bson::from_document(document)?;
            if entity.is_live() {
                live.push(entity);
            }
        }

        if live.is_empty() {
            return Err(StoreError::not_found(collection.as_str()));
        }
        Ok(live)
    }

    /// Live document by identifier
    pub async fn find_by_id<T: SoftDeletable>(
        &self,
        id: impl Into<Bson>,
        collection: &str,
    ) -> Result<T, StoreError> {
        self.find(Selector::by_id(id), collection).await
    }

    /// Raw documents matching `selector` regardless of deletion state
    pub async fn find_raw(
        &self,
        selector: impl Into<Selector>,
        collection: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let collection = Self::collection(collection)?;
        self.backend
            .find(collection.as_str(), into_selector(selector).to_document())
            .await
    }

    /// Number of live documents matching `selector`
    pub async fn count_live<T: SoftDeletable>(
        &self,
        selector: impl Into<Selector>,
        collection: &str,
    ) -> Result<u64, StoreError> {
        let collection = Self::collection(collection)?;
        let filter = into_selector(selector)
            .live(&T::metadata_path(DELETED_AT_FIELD))
            .to_document();
        self.backend.count(collection.as_str(), filter).await
    }

    /// Patch the stored document carrying the entity's identifier
    ///
    /// Every top-level field the entity serializes is overwritten; stored
    /// fields it does not serialize are kept. The deletion timestamp is never
    /// written here.
    pub async fn update<T: SoftDeletable>(
        &self,
        entity: &mut T,
        collection: &str,
    ) -> Result<(), StoreError> {
        let collection = Self::collection(collection)?;
        let id = entity
            .id()
            .ok_or_else(|| StoreError::missing_identifier(collection.as_str()))?;

        let updated_at = entity.metadata_mut().touch();
        let patch = field_patch::<T>(bson::to_document(entity)?, updated_at);

        tracing::debug!("[UPDATE] Collection: {}, id: {}", collection, id);
        let outcome = self
            .backend
            .update_one(
                collection.as_str(),
                doc! { "_id": id.clone() },
                doc! { "$set": patch },
            )
            .await?;

        if outcome.matched == 0 {
            return Err(StoreError::not_found(collection.as_str()));
        }

        self.emit_signal(
            DocumentEvent::new(EventType::Update, collection.as_str()).with_document_id(id_label(&id)),
        );
        Ok(())
    }

    /// Soft-delete the first document matching `selector`
    ///
    /// The document's previous state is not checked: removing an already
    /// deleted document moves its deletion timestamp forward.
    pub async fn remove<T: SoftDeletable>(
        &self,
        selector: impl Into<Selector>,
        collection: &str,
    ) -> Result<(), StoreError> {
        let collection = Self::collection(collection)?;
        let filter = into_selector(selector).to_document();

        tracing::debug!("[REMOVE] Collection: {}, filter: {}", collection, filter);
        let outcome = self
            .backend
            .update_one(
                collection.as_str(),
                filter,
                stamp_deleted(&T::metadata_path(DELETED_AT_FIELD)),
            )
            .await?;

        if outcome.matched == 0 {
            return Err(StoreError::not_found(collection.as_str()));
        }

        self.emit_signal(DocumentEvent::new(EventType::SoftDelete, collection.as_str()));
        Ok(())
    }

    /// Physically delete the first document matching `selector`
    pub async fn remove_hard(
        &self,
        selector: impl Into<Selector>,
        collection: &str,
    ) -> Result<(), StoreError> {
        let collection = Self::collection(collection)?;
        let filter = into_selector(selector).to_document();

        tracing::debug!("[REMOVE_HARD] Collection: {}, filter: {}", collection, filter);
        let deleted = self.backend.delete_one(collection.as_str(), filter).await?;

        if deleted == 0 {
            return Err(StoreError::not_found(collection.as_str()));
        }

        self.emit_signal(DocumentEvent::new(EventType::HardDelete, collection.as_str()));
        Ok(())
    }

    /// Soft-delete every live document matching `selector`
    ///
    /// `matched` counts every fetched document, dead ones included; `updated`
    /// counts the live ones that were stamped. A failed per-document update is
    /// logged and left out of `updated` without failing the call.
    pub async fn remove_all<T: SoftDeletable>(
        &self,
        selector: impl Into<Selector>,
        collection: &str,
    ) -> Result<ChangeSummary, StoreError> {
        let collection = Self::collection(collection)?;
        let documents = self
            .backend
            .find(collection.as_str(), into_selector(selector).to_document())
            .await?;

        let deleted_path = T::metadata_path(DELETED_AT_FIELD);
        let mut summary = ChangeSummary::default();

        for document in documents {
            summary.matched += 1;

            if !path::is_live_at(&document, &deleted_path) {
                continue;
            }

            let Some(id) = document.get("_id").cloned() else {
                tracing::warn!(
                    "[REMOVE_ALL] Collection: {}, skipping document without _id",
                    collection
                );
                continue;
            };

            // Only stamp documents still live at write time
            let mut filter = doc! { "_id": id.clone() };
            filter.insert(deleted_path.clone(), Bson::Null);

            match self
                .backend
                .update_one(collection.as_str(), filter, stamp_deleted(&deleted_path))
                .await
            {
                Ok(outcome) if outcome.matched > 0 => summary.updated += 1,
                Ok(_) => {
                    tracing::debug!(
                        "[REMOVE_ALL] Collection: {}, id: {} no longer live",
                        collection,
                        id
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "[REMOVE_ALL] Collection: {}, id: {} soft delete failed: {}",
                        collection,
                        id,
                        e
                    );
                }
            }
        }

        tracing::debug!(
            "[REMOVE_ALL] Collection: {}, matched: {}, updated: {}",
            collection,
            summary.matched,
            summary.updated
        );

        if summary.updated > 0 {
            self.emit_signal(
                DocumentEvent::new(EventType::SoftDelete, collection.as_str())
                    .with_affected(summary.updated)
                    .with_payload("matched", serde_json::json!(summary.matched)),
            );
        }

        Ok(summary)
    }

    /// Physically delete every document matching `selector` in one call
    pub async fn remove_all_hard(
        &self,
        selector: impl Into<Selector>,
        collection: &str,
    ) -> Result<ChangeSummary, StoreError> {
        let collection = Self::collection(collection)?;
        let filter = into_selector(selector).to_document();

        tracing::debug!("[REMOVE_ALL_HARD] Collection: {}, filter: {}", collection, filter);
        let removed = self.backend.delete_many(collection.as_str(), filter).await?;

        if removed > 0 {
            self.emit_signal(
                DocumentEvent::new(EventType::HardDelete, collection.as_str()).with_affected(removed),
            );
        }

        Ok(ChangeSummary::removed(removed))
    }
}
