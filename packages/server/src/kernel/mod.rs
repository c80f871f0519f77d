//! Kernel module - server infrastructure and dependencies.

pub mod blob_store;
pub mod deps;
pub mod email;
pub mod test_dependencies;
pub mod traits;

pub use blob_store::LocalBlobStore;
pub use deps::ServerDeps;
pub use email::SmtpNotifier;
pub use traits::*;
