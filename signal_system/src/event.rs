//! Document event types and definitions
//!
//! This module defines the structure of lifecycle events
//! that flow through the signal system.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Payload;

/// Document lifecycle event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Insert,
    Update,
    SoftDelete,
    HardDelete,
}

/// Document event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEvent {
    /// Unique event ID
    pub id: Uuid,
    /// Event type
    pub event_type: EventType,
    /// Collection the document lives in
    pub collection: String,
    /// Document identifier (if a single document was affected)
    pub document_id: Option<String>,
    /// Number of documents affected
    pub affected: u64,
    /// Additional data
    pub payload: Payload,
    /// Event timestamp (UTC)
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl DocumentEvent {
    pub fn new(event_type: EventType, collection: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            collection: collection.into(),
            document_id: None,
            affected: 1,
            payload: Payload::new(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    pub fn with_affected(mut self, affected: u64) -> Self {
        self.affected = affected;
        self
    }

    pub fn with_payload(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    pub fn add_payload(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.payload.insert(key.into(), value);
    }

    /// Whether the event removed documents from every read path
    pub fn is_removal(&self) -> bool {
        matches!(self.event_type, EventType::SoftDelete | EventType::HardDelete)
    }
}
