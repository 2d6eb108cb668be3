//! Trait definitions
//!
//! Capability traits for entities stored with soft-delete semantics.

use crate::errors::StoreError;
use crate::metadata::{SoftDeleteMetadata, DEFAULT_METADATA_KEY};
use bson::Bson;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Entity types that embed [`SoftDeleteMetadata`] and carry a store identifier
///
/// Usually derived with `#[derive(SoftDeletable)]` or the `#[document]` attribute:
///
/// ```ignore
/// use mongohaus::prelude::*;
///
/// #[document(collection = "items")]
/// pub struct Item {
///     #[id]
///     pub id: Option<ObjectId>,
///     pub name: String,
///     #[metadata]
///     pub timestamps: SoftDeleteMetadata,
/// }
/// ```
///
/// The identifier must serialize under `_id`.
pub trait SoftDeletable: Serialize + DeserializeOwned + Send + Sync + Unpin {
    /// Key of the embedded metadata sub-document, `None` when flattened
    fn metadata_key() -> Option<&'static str> {
        Some(DEFAULT_METADATA_KEY)
    }

    fn metadata(&self) -> &SoftDeleteMetadata;

    fn metadata_mut(&mut self) -> &mut SoftDeleteMetadata;

    /// Store identifier, `None` until the entity has been inserted
    fn id(&self) -> Option<Bson>;

    /// Write back the identifier the store assigned on insert
    fn set_id(&mut self, id: Bson) -> Result<(), StoreError>;

    fn is_live(&self) -> bool {
        self.metadata().is_live()
    }

    /// Dotted document path of a metadata field
    fn metadata_path(field: &str) -> String {
        match Self::metadata_key() {
            Some(key) => format!("{}.{}", key, field),
            None => field.to_string(),
        }
    }
}

/// Entities bound to a fixed collection
pub trait DocumentCollection: SoftDeletable {
    fn collection_name() -> &'static str;
}

/// Convert an identifier field into BSON, treating null as "no identifier"
pub fn id_to_bson<I: Serialize>(id: &I) -> Option<Bson> {
    match bson::to_bson(id) {
        Ok(Bson::Null) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

/// Decode a store-assigned identifier into the entity's identifier type
pub fn id_from_bson<I: DeserializeOwned>(id: Bson) -> Result<I, StoreError> {
    Ok(bson::from_bson(id)?)
}
