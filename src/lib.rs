pub mod config;
pub mod rest;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use config::ServerConfig;
use rest::auth::IdentityProvider;
use storage::Storage;
use tasks::TaskStorage;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub storage: Arc<Storage>,
    /// Owner-scoped task CRUD over the shared SQLite pool.
    pub tasks: Arc<TaskStorage>,
    /// External-auth boundary: bearer token → user id.
    pub identity: Arc<dyn IdentityProvider>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(
        config: ServerConfig,
        storage: Storage,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let tasks = Arc::new(TaskStorage::new(storage.pool()));
        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            tasks,
            identity,
            started_at: std::time::Instant::now(),
        }
    }
}
