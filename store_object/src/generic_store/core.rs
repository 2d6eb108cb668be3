use crate::errors::StoreError;
use crate::traits::DocumentBackend;
use crate::validation::ValidatedCollectionName;
use signal_system::{DocumentEvent, SignalManager};
use std::sync::Arc;

/// Repository enforcing soft-delete semantics over a document store
///
/// Operations are parameterized by collection name; the entity type decides
/// where its metadata lives. Cloning is cheap and shares the store handle.
pub struct SoftDeleteRepository<B: DocumentBackend> {
    pub(crate) backend: Arc<B>,
    pub(crate) signal_manager: Option<Arc<SignalManager>>,
}

impl<B: DocumentBackend> Clone for SoftDeleteRepository<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            signal_manager: self.signal_manager.clone(),
        }
    }
}

impl<B: DocumentBackend> std::fmt::Debug for SoftDeleteRepository<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftDeleteRepository")
            .field("backend", &self.backend)
            .field("has_signals", &self.has_signals())
            .finish()
    }
}

impl<B: DocumentBackend> SoftDeleteRepository<B> {
    pub fn new(backend: B) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    pub fn from_shared(backend: Arc<B>) -> Self {
        Self {
            backend,
            signal_manager: None,
        }
    }

    pub fn with_signals(mut self, signal_manager: Arc<SignalManager>) -> Self {
        self.signal_manager = Some(signal_manager);
        self
    }

    /// Set signal manager for this repository
    pub fn set_signal_manager(&mut self, signal_manager: Arc<SignalManager>) {
        self.signal_manager = Some(signal_manager);
    }

    /// Remove signal manager from this repository
    pub fn remove_signal_manager(&mut self) {
        self.signal_manager = None;
    }

    /// Check if signal manager is set
    pub fn has_signals(&self) -> bool {
        self.signal_manager.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn collection(name: &str) -> Result<ValidatedCollectionName, StoreError> {
        Ok(ValidatedCollectionName::new(name)?)
    }

    pub(crate) fn emit_signal(&self, event: DocumentEvent) {
        if let Some(signal_manager) = &self.signal_manager {
            signal_manager.emit(event);
        }
    }
}
