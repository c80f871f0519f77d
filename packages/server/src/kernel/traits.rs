// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Naming convention: Base* for trait names (e.g., BaseNotifier, BaseBlobStore)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Notifier Trait (Infrastructure - outbound email)
// =============================================================================

#[async_trait]
pub trait BaseNotifier: Send + Sync {
    /// Send a plain-text message to a recipient address
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}

// =============================================================================
// Blob Store Trait (Infrastructure - uploaded documents)
// =============================================================================

#[async_trait]
pub trait BaseBlobStore: Send + Sync {
    /// Store `bytes` under a collision-free key derived from `original_name`.
    ///
    /// Returns the key, which is what gets persisted in the database.
    async fn put(&self, original_name: &str, bytes: &[u8]) -> Result<String>;

    /// Remove a stored blob (missing keys are not an error)
    async fn delete(&self, key: &str) -> Result<()>;
}
