//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests. The container and the
//! migrations are initialized once on the first test, then reused.

use anyhow::{Context, Result};
use agriconnect_core::config::AdminCredentials;
use agriconnect_core::domains::auth::JwtService;
use agriconnect_core::kernel::test_dependencies::{MemoryBlobStore, RecordingNotifier};
use agriconnect_core::kernel::{BaseBlobStore, BaseNotifier, ServerDeps};
use agriconnect_core::server::build_app;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration_test_secret_at_least_32b";
pub const TEST_JWT_ISSUER: &str = "agriconnect_test";
pub const ADMIN_EMAIL: &str = "admin@agriconnect.test";
pub const ADMIN_PASSWORD: &str = "admin-test-password";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness wrapping the full router with in-memory mail and storage.
///
/// The database is shared between tests, so tests must use unique mobile
/// numbers and emails (see [`unique_mobile`]).
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let (status, body) = ctx.post_json("/login", json!({...}), None).await;
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for assertions on stored rows.
    pub db_pool: PgPool,
    pub notifier: RecordingNotifier,
    pub blob_store: MemoryBlobStore,
    pub jwt_service: Arc<JwtService>,
    router: Router,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        Self::with_notifier(RecordingNotifier::new()).await
    }

    /// Harness whose outbound mail goes through `notifier`
    pub async fn with_notifier(notifier: RecordingNotifier) -> Result<Self> {
        let blob_store = MemoryBlobStore::new();
        Self::assemble(
            notifier.clone(),
            blob_store.clone(),
            Arc::new(notifier),
            Arc::new(blob_store),
            DEFAULT_MAX_CONNECTIONS,
        )
        .await
    }

    /// Harness with arbitrary infrastructure and a pool of `max_connections`.
    ///
    /// `notifier` and `blob_store` on the returned harness stay empty; the
    /// caller observes its own doubles.
    pub async fn with_infra(
        notifier: Arc<dyn BaseNotifier>,
        blob_store: Arc<dyn BaseBlobStore>,
        max_connections: u32,
    ) -> Result<Self> {
        Self::assemble(
            RecordingNotifier::new(),
            MemoryBlobStore::new(),
            notifier,
            blob_store,
            max_connections,
        )
        .await
    }

    async fn assemble(
        recording_notifier: RecordingNotifier,
        memory_blob_store: MemoryBlobStore,
        notifier: Arc<dyn BaseNotifier>,
        blob_store: Arc<dyn BaseBlobStore>,
        max_connections: u32,
    ) -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let jwt_service = Arc::new(JwtService::new(
            TEST_JWT_SECRET,
            TEST_JWT_ISSUER.to_string(),
        ));

        let deps = ServerDeps::new(
            db_pool.clone(),
            notifier,
            blob_store,
            jwt_service.clone(),
            AdminCredentials {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            },
        );
        let router = build_app(deps, Path::new("uploads"), &[]);

        Ok(Self {
            db_pool,
            notifier: recording_notifier,
            blob_store: memory_blob_store,
            jwt_service,
            router,
        })
    }

    /// Send a request through the router and decode the JSON response body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request("GET", uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        self.send_json("POST", uri, body, token).await
    }

    pub async fn put_json(&self, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        self.send_json("PUT", uri, body, token).await
    }

    /// POST with no body (review routes)
    pub async fn post_empty(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request("POST", uri, token).body(Body::empty()).unwrap())
            .await
    }

    async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let request = request(method, uri, token)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Log in as the configured administrator and return the token
    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .post_json(
                "/admin/login",
                serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
        body["token"].as_str().expect("token").to_string()
    }
}

fn request(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}
