use tokio::runtime::{Builder, Runtime};

use crate::protocol::{SyncRequest, SyncResponse};
use crate::{HttpService, ServiceError, SyncBackend};

/// Blocking wrapper around an async `SyncBackend`.
///
/// Owns a current-thread tokio runtime and uses `block_on()` for each call.
/// Designed for sync callers like the TUI.
pub struct BlockingService<B> {
    inner: B,
    rt: Runtime,
}

pub type BlockingHttpService = BlockingService<HttpService>;

impl<B: SyncBackend> BlockingService<B> {
    pub fn new(inner: B) -> Result<Self, ServiceError> {
        let rt = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ServiceError::Internal(format!("failed to create tokio runtime: {e}")))?;
        Ok(Self { inner, rt })
    }

    pub fn sync(&self, request: &SyncRequest) -> Result<SyncResponse, ServiceError> {
        self.rt.block_on(self.inner.sync(request))
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl BlockingService<HttpService> {
    pub fn connect(base_url: &str, token: String) -> Result<Self, ServiceError> {
        Self::new(HttpService::with_token(base_url, token))
    }
}
