use async_trait::async_trait;
use thiserror::Error;

use crate::protocol::{SyncRequest, SyncResponse};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("{command} failed: {message}")]
    Command { command: String, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

/// Transport for the service's sync protocol.
///
/// `HttpService` talks to the hosted service; `MemoryBackend` keeps the
/// whole account in process.
#[async_trait]
pub trait SyncBackend: Send + Sync {
    /// Sends queued commands (possibly none) and returns everything that
    /// changed since `request.sync_token`.
    async fn sync(&self, request: &SyncRequest) -> Result<SyncResponse, ServiceError>;
}
