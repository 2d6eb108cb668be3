//! Typed store bound to an entity's collection

use super::core::SoftDeleteRepository;
use crate::errors::StoreError;
use crate::metadata::ChangeSummary;
use crate::selector::Selector;
use crate::traits::{DocumentBackend, DocumentCollection};
use bson::{Bson, Document};
use std::marker::PhantomData;

/// Repository view fixed to `T` and `T::collection_name()`
pub struct EntityStore<B: DocumentBackend, T: DocumentCollection> {
    repository: SoftDeleteRepository<B>,
    _phantom: PhantomData<fn() -> T>,
}

impl<B: DocumentBackend, T: DocumentCollection> Clone for EntityStore<B, T> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<B: DocumentBackend, T: DocumentCollection> std::fmt::Debug for EntityStore<B, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("collection", &T::collection_name())
            .field("repository", &self.repository)
            .finish()
    }
}

impl<B: DocumentBackend> SoftDeleteRepository<B> {
    /// Typed view over the collection `T` is declared for
    pub fn store<T: DocumentCollection>(&self) -> EntityStore<B, T> {
        EntityStore {
            repository: self.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<B: DocumentBackend, T: DocumentCollection> EntityStore<B, T> {
    pub fn collection_name(&self) -> &'static str {
        T::collection_name()
    }

    pub fn repository(&self) -> &SoftDeleteRepository<B> {
        &self.repository
    }

    pub async fn insert(&self, entity: &mut T) -> Result<Bson, StoreError> {
        self.repository.insert(entity, T::collection_name()).await
    }

    pub async fn find(&self, selector: impl Into<Selector>) -> Result<T, StoreError> {
        self.repository.find(selector, T::collection_name()).await
    }

    pub async fn find_all(&self, selector: impl Into<Selector>) -> Result<Vec<T>, StoreError> {
        self.repository.find_all(selector, T::collection_name()).await
    }

    pub async fn find_by_id(&self, id: impl Into<Bson>) -> Result<T, StoreError> {
        self.repository.find_by_id(id, T::collection_name()).await
    }

    pub async fn find_raw(&self, selector: impl Into<Selector>) -> Result<Vec<Document>, StoreError> {
        self.repository.find_raw(selector, T::collection_name()).await
    }

    pub async fn count_live(&self, selector: impl Into<Selector>) -> Result<u64, StoreError> {
        self.repository
            .count_live::<T>(selector, T::collection_name())
            .await
    }

    pub async fn update(&self, entity: &mut T) -> Result<(), StoreError> {
        self.repository.update(entity, T::collection_name()).await
    }

    pub async fn remove(&self, selector: impl Into<Selector>) -> Result<(), StoreError> {
        self.repository
            .remove::<T>(selector, T::collection_name())
            .await
    }

    pub async fn remove_hard(&self, selector: impl Into<Selector>) -> Result<(), StoreError> {
        self.repository
            .remove_hard(selector, T::collection_name())
            .await
    }

    pub async fn remove_all(&self, selector: impl Into<Selector>) -> Result<ChangeSummary, StoreError> {
        self.repository
            .remove_all::<T>(selector, T::collection_name())
            .await
    }

    pub async fn remove_all_hard(
        &self,
        selector: impl Into<Selector>,
    ) -> Result<ChangeSummary, StoreError> {
        self.repository
            .remove_all_hard(selector, T::collection_name())
            .await
    }
}
