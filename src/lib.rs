//! # MongoHaus
//!
//! A MongoDB document layer that never loses data by accident: entities carry
//! soft-delete metadata, reads only see live documents and removals stamp a
//! deletion timestamp unless explicitly hard.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mongohaus::prelude::*;
//!
//! #[document(collection = "items")]
//! pub struct Item {
//!     #[id]
//!     pub id: Option<ObjectId>,
//!     pub name: String,
//!     #[metadata]
//!     pub timestamps: SoftDeleteMetadata,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new("localhost:27017", "mongohaus");
//!     let mongohaus = MongoHaus::new(config).await?;
//!
//!     let items = mongohaus.store::<Item>();
//!     let mut item = Item {
//!         id: None,
//!         name: "widget".to_string(),
//!         timestamps: SoftDeleteMetadata::default(),
//!     };
//!     let id = items.insert(&mut item).await?;
//!
//!     items.remove(Selector::by_id(id.clone())).await?;
//!     assert!(items.find_by_id(id).await.is_err());
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::MongoHaus;
pub use errors::MongoHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, SignalConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use document_derive;
pub use signal_system;
pub use store_object;

// Re-export external dependencies used in public API
pub use async_trait;
pub use bson;
pub use mongodb;
