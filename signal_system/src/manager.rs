use config::SignalConfig;

use crate::event::DocumentEvent;
use crate::types::EventCallback;

/// Signal manager for document event notifications
pub struct SignalManager {
    callbacks: std::sync::RwLock<Vec<EventCallback>>,
    max_callbacks: usize,
}

impl std::fmt::Debug for SignalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalManager")
            .field("callback_count", &self.callback_count())
            .field("max_callbacks", &self.max_callbacks)
            .finish()
    }
}

impl SignalManager {
    pub fn new() -> Self {
        Self::with_config(&SignalConfig::default())
    }

    pub fn with_config(config: &SignalConfig) -> Self {
        Self {
            callbacks: std::sync::RwLock::new(Vec::new()),
            max_callbacks: config.max_callbacks,
        }
    }

    /// Add event callback
    ///
    /// Returns `false` when the callback limit is reached and the callback was dropped.
    pub fn add_callback<F>(&self, callback: F) -> bool
    where
        F: Fn(&DocumentEvent) + Send + Sync + 'static,
    {
        if let Ok(mut callbacks) = self.callbacks.write() {
            if callbacks.len() >= self.max_callbacks {
                tracing::warn!(
                    max_callbacks = self.max_callbacks,
                    "signal callback limit reached, callback not registered"
                );
                return false;
            }
            callbacks.push(Box::new(callback));
            return true;
        }
        false
    }

    /// Emit event to all subscribers
    pub fn emit(&self, event: DocumentEvent) {
        #[cfg(feature = "debug-logging")]
        tracing::trace!(
            event_type = ?event.event_type,
            collection = %event.collection,
            "emitting document event"
        );

        if let Ok(callbacks) = self.callbacks.read() {
            for callback in callbacks.iter() {
                callback(&event);
            }
        }
    }

    /// Clear all callbacks
    pub fn clear_callbacks(&self) {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.clear();
        }
    }

    /// Get number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().map(|c| c.len()).unwrap_or(0)
    }
}

impl Default for SignalManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_emit_reaches_every_callback() {
        let manager = SignalManager::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = hits.clone();
            manager.add_callback(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        manager.emit(DocumentEvent::new(EventType::Insert, "items"));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_callback_limit() {
        let manager = SignalManager::with_config(&SignalConfig::new(true, 1));
        assert!(manager.add_callback(|_| {}));
        assert!(!manager.add_callback(|_| {}));
        assert_eq!(manager.callback_count(), 1);
    }

    #[test]
    fn test_clear_callbacks() {
        let manager = SignalManager::new();
        manager.add_callback(|_| {});
        manager.clear_callbacks();
        assert_eq!(manager.callback_count(), 0);
    }
}
