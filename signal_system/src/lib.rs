//! Signal system for document lifecycle events
//!
//! This crate provides callback registration and event delivery
//! for repository operations in the MongoHaus ecosystem.

pub mod event;
pub mod manager;
pub mod prelude;
pub mod types;

pub use event::{DocumentEvent, EventType};
pub use manager::SignalManager;
pub use types::{EventCallback, Payload};
