use std::sync::OnceLock;
use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::config;

/// Errors from the store layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URI: {0}")]
    InvalidUri(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error(transparent)]
    Serialize(#[from] mongodb::bson::ser::Error),
}

/// Process-wide MongoDB client, connected on first use and reused after that.
///
/// The driver's `Client` owns its own connection pool and is cheap to clone,
/// so callers get a clone and never hold the lock across a query.
pub struct DatabaseManager {
    client: RwLock<Option<Client>>,
}

impl DatabaseManager {
    fn instance() -> &'static DatabaseManager {
        static INSTANCE: OnceLock<DatabaseManager> = OnceLock::new();
        INSTANCE.get_or_init(|| DatabaseManager {
            client: RwLock::new(None),
        })
    }

    /// Get the configured application database
    pub async fn database() -> Result<Database, DatabaseError> {
        let client = Self::instance().get_client().await?;
        Ok(client.database(&config().database.name))
    }

    /// Get existing client or connect a new one lazily
    async fn get_client(&self) -> Result<Client, DatabaseError> {
        // Fast path: try read lock
        {
            let client = self.client.read().await;
            if let Some(client) = client.as_ref() {
                return Ok(client.clone());
            }
        }

        let mut slot = self.client.write().await;
        // Another task may have connected while we waited for the write lock
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let options = Self::client_options().await?;
        let client = Client::with_options(options)?;
        *slot = Some(client.clone());

        info!("Created MongoDB client for database: {}", config().database.name);
        Ok(client)
    }

    async fn client_options() -> Result<ClientOptions, DatabaseError> {
        let settings = &config().database;
        let uri = settings
            .uri
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("MONGODB_URI"))?;

        if !Self::is_mongo_uri(uri) {
            return Err(DatabaseError::InvalidUri(uri.to_string()));
        }

        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.max_pool_size = Some(settings.max_pool_size);
        options.connect_timeout = Some(Duration::from_secs(settings.connect_timeout));
        options.server_selection_timeout = Some(Duration::from_secs(settings.connect_timeout));
        Ok(options)
    }

    /// Pings the server to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let db = Self::database().await?;
        db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Drop the shared client (e.g., on shutdown). The next call reconnects.
    pub async fn close() {
        let manager = Self::instance();
        let client = manager.client.write().await.take();
        if let Some(client) = client {
            client.shutdown().await;
            info!("Closed MongoDB client");
        }
    }

    fn is_mongo_uri(uri: &str) -> bool {
        uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://")
    }
}
