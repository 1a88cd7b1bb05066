//! Backend factory for interface tests.

use std::env;
use std::sync::Arc;

#[cfg(feature = "sqlite")]
use casematch::storage::SqliteEventStore;
use casematch::storage::{EventStore, MemoryEventStore};

/// Storage backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

impl StorageBackend {
    pub fn from_env() -> Self {
        match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "sqlite" => StorageBackend::Sqlite,
            _ => StorageBackend::Memory,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Sqlite => "sqlite",
        }
    }
}

/// A live store plus whatever must outlive it.
pub struct StorageContext {
    pub event_store: Arc<dyn EventStore>,
    _dir: Option<tempfile::TempDir>,
}

impl std::fmt::Debug for StorageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageContext").finish_non_exhaustive()
    }
}

impl StorageContext {
    pub async fn new(backend: StorageBackend) -> Self {
        match backend {
            StorageBackend::Memory => Self {
                event_store: Arc::new(MemoryEventStore::new()),
                _dir: None,
            },
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite => {
                let dir = tempfile::tempdir().expect("Failed to create temp dir");
                let path = dir.path().join("events.db");
                let pool =
                    sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", path.display()))
                        .await
                        .expect("Failed to open SQLite database");
                let store = SqliteEventStore::new(pool);
                store.init().await.expect("Failed to create schema");
                Self {
                    event_store: Arc::new(store),
                    _dir: Some(dir),
                }
            }
            #[cfg(not(feature = "sqlite"))]
            StorageBackend::Sqlite => panic!("SQLite backend requires the 'sqlite' feature"),
        }
    }
}
