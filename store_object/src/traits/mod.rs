//! Traits for document operations
//!
//! This module contains the capability trait entities implement and the
//! contract a document store has to satisfy.

pub mod backend;
pub mod soft_deletable;

// Re-export all public items for convenience
pub use backend::{DocumentBackend, UpdateOutcome};
pub use soft_deletable::{id_from_bson, id_to_bson, DocumentCollection, SoftDeletable};
