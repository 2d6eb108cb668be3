//! Convenience re-exports for common MongoHaus usage
//!
//! This prelude module re-exports the most commonly used items from the MongoHaus ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use mongohaus::prelude::*;
//!
//! // Now you have access to all the common MongoHaus types and traits
//! ```

// Core MongoHaus components
pub use crate::core::MongoHaus;
pub use crate::errors::MongoHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, SignalConfig};

// Re-export commonly used store-object types for convenience
pub use store_object::prelude::*;

// Re-export store_object module for macro-generated code
pub use store_object;

// Re-export signal system for event handling
pub use signal_system::prelude::*;

// Re-export document derive for entity declarations
pub use document_derive::{document, SoftDeletable};

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use bson;
pub use mongodb;
pub use tokio;
