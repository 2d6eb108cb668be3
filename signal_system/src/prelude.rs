//! Convenience re-exports for common signal-system usage

// Core signal system components
pub use crate::event::{DocumentEvent, EventType};
pub use crate::manager::SignalManager;
pub use crate::types::{EventCallback, Payload};

// Common external dependencies
pub use serde::{Deserialize, Serialize};
pub use serde_json;
