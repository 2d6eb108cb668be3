use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No live document found in collection '{collection}'")]
    NotFound { collection: String },

    #[error("Entity in collection '{collection}' has no identifier; insert it before updating")]
    MissingIdentifier { collection: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(collection: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
        }
    }

    pub fn missing_identifier(collection: &str) -> Self {
        Self::MissingIdentifier {
            collection: collection.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<bson::de::Error> for StoreError {
    fn from(err: bson::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
