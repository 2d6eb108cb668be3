//! Error types for the MongoHaus crate
//!
//! This module contains all error types that can be returned by MongoHaus operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MongoHausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] mongodb::error::Error),

    #[error("Store error: {0}")]
    Store(#[from] store_object::StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
