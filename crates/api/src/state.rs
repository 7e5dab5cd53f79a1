use std::sync::Arc;

use coursekit_storage::ObjectStore;
use coursekit_vimeo::VimeoApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: coursekit_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object storage provider for thumbnails and attachments.
    pub storage: Arc<dyn ObjectStore>,
    /// Video host client used by the server-side relay.
    pub vimeo: Arc<VimeoApi>,
}
