mod blocking;
pub mod credentials;
mod http;
mod memory;
pub mod protocol;
mod store;
mod traits;

pub use blocking::{BlockingHttpService, BlockingService};
pub use credentials::CredentialsError;
pub use http::HttpService;
pub use memory::MemoryBackend;
pub use store::TaskStore;
pub use traits::{ServiceError, SyncBackend};
