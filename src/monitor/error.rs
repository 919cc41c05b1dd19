use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("monitor already running")]
    AlreadyRunning,
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("screening task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
