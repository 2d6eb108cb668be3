//! MongoDB-backed document store

use crate::errors::StoreError;
use crate::traits::{DocumentBackend, UpdateOutcome};
use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

/// Document store over a driver `Database` handle
///
/// The driver pools connections; every call checks one out and returns it
/// when the operation future completes or is dropped.
#[derive(Clone, Debug)]
pub struct MongoBackend {
    database: Database,
}

impl MongoBackend {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentBackend for MongoBackend {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(result.inserted_id)
    }

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        Ok(self.collection(collection).count_documents(filter).await?)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, update)
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(result.deleted_count)
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let result = self.collection(collection).delete_many(filter).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
