//! Core MongoHaus functionality
//!
//! This module contains the main MongoHaus struct and its implementation,
//! providing centralized coordination for the driver client, repositories
//! and signals.

use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::sync::Arc;
use std::time::Duration;
use store_object::traits::{DocumentBackend, DocumentCollection};
use store_object::{EntityStore, MongoBackend, SoftDeleteRepository};

use crate::errors::MongoHausError;
use config::{AppConfig, DatabaseConfig};
use signal_system::SignalManager;

/// Main MongoHaus coordinator that owns the driver client
pub struct MongoHaus {
    client: Client,
    backend: Arc<MongoBackend>,
    config: DatabaseConfig,
    signal_manager: Option<Arc<SignalManager>>,
}

impl MongoHaus {
    /// Create new MongoHaus with a configured driver client
    ///
    /// The driver connects lazily; use [`MongoHaus::health_check`] to verify
    /// the server is reachable.
    pub async fn new(config: DatabaseConfig) -> Result<Self, MongoHausError> {
        config.validate()?;

        let mut options = ClientOptions::parse(config.connection_string()).await?;
        if let Some(app_name) = &config.app_name {
            options.app_name = Some(app_name.clone());
        }
        options.connect_timeout = Some(Duration::from_millis(config.connect_timeout_ms));
        options.server_selection_timeout =
            Some(Duration::from_millis(config.server_selection_timeout_ms));

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);

        crate::debug_log!(
            "[CONNECT] Address: {}, database: {}",
            config.address,
            config.database
        );

        Ok(Self {
            client,
            backend: Arc::new(MongoBackend::new(database)),
            config,
            signal_manager: None,
        })
    }

    /// Create MongoHaus from a loaded application configuration
    ///
    /// A signal manager is attached when `[signal] enabled = true`.
    pub async fn from_app_config(app_config: &AppConfig) -> Result<Self, MongoHausError> {
        let mongohaus = Self::new(app_config.database.clone()).await?;
        if app_config.signal.enabled {
            let signal_manager = Arc::new(SignalManager::with_config(&app_config.signal));
            return Ok(mongohaus.with_signals(signal_manager));
        }
        Ok(mongohaus)
    }

    /// Attach a signal manager to every repository handed out from now on
    pub fn with_signals(mut self, signal_manager: Arc<SignalManager>) -> Self {
        self.signal_manager = Some(signal_manager);
        self
    }

    pub fn signal_manager(&self) -> Option<&Arc<SignalManager>> {
        self.signal_manager.as_ref()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        self.backend.database()
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Soft-delete repository over the configured database
    pub fn repository(&self) -> SoftDeleteRepository<MongoBackend> {
        let repository = SoftDeleteRepository::from_shared(Arc::clone(&self.backend));
        match &self.signal_manager {
            Some(signal_manager) => repository.with_signals(Arc::clone(signal_manager)),
            None => repository,
        }
    }

    /// Typed store for an entity bound to a collection
    pub fn store<T: DocumentCollection>(&self) -> EntityStore<MongoBackend, T> {
        self.repository().store::<T>()
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), MongoHausError> {
        self.backend.ping().await?;
        Ok(())
    }
}

impl std::fmt::Debug for MongoHaus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoHaus")
            .field("address", &self.config.address)
            .field("database", &self.config.database)
            .field("has_signals", &self.signal_manager.is_some())
            .finish()
    }
}
