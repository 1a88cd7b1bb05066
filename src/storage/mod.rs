//! Storage implementations.

use std::sync::Arc;

use tracing::info;

use crate::config::{StorageConfig, StorageType};

pub mod helpers;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use crate::interfaces::event_store::Result;
pub use crate::interfaces::{EventStore, StorageError};
pub use memory::MemoryEventStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteEventStore;

/// Initialize the event store selected by configuration.
pub async fn init_storage(config: &StorageConfig) -> Result<Arc<dyn EventStore>> {
    match config.storage_type {
        StorageType::Memory => {
            info!("Storage: in-memory");
            Ok(Arc::new(MemoryEventStore::new()))
        }
        #[cfg(feature = "sqlite")]
        StorageType::Sqlite => {
            info!("Storage: sqlite at {}", config.path);
            if let Some(parent) = std::path::Path::new(&config.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            let pool =
                sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.path)).await?;

            let event_store = SqliteEventStore::new(pool);
            event_store.init().await?;
            Ok(Arc::new(event_store))
        }
        #[cfg(not(feature = "sqlite"))]
        StorageType::Sqlite => {
            tracing::error!("SQLite storage requested but 'sqlite' feature is not enabled");
            Err(StorageError::UnknownStorageType("sqlite".to_string()))
        }
    }
}
