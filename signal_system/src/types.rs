//! Type definitions for signal system
//!
//! Callback and payload aliases shared by the manager and events.

use crate::event::DocumentEvent;
use std::collections::HashMap;

/// Event callback type
pub type EventCallback = Box<dyn Fn(&DocumentEvent) + Send + Sync>;

/// Free-form event payload keyed by field name
pub type Payload = HashMap<String, serde_json::Value>;
