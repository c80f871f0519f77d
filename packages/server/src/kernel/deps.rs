//! Server dependencies shared by every request (using traits for testability)
//!
//! External collaborators (mail, file storage) sit behind trait objects so
//! integration tests can swap them for in-memory doubles.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AdminCredentials;
use crate::domains::auth::JwtService;
use crate::kernel::{BaseBlobStore, BaseNotifier};

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub notifier: Arc<dyn BaseNotifier>,
    pub blob_store: Arc<dyn BaseBlobStore>,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
    /// Configured administrator identity
    pub admin: Arc<AdminCredentials>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        notifier: Arc<dyn BaseNotifier>,
        blob_store: Arc<dyn BaseBlobStore>,
        jwt_service: Arc<JwtService>,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            db_pool,
            notifier,
            blob_store,
            jwt_service,
            admin: Arc::new(admin),
        }
    }
}
