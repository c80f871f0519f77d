//! Application setup and server configuration.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    admin_login_handler, approve_handler, get_user_handler, health_handler,
    list_submissions_handler, login_handler, register_handler, reject_handler,
    reset_password_handler, submit_handler, verify_user_handler, MAX_UPLOAD_BYTES,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// `upload_dir` is served read-only under `/uploads`. An empty
/// `allowed_origins` list allows any origin.
pub fn build_app(deps: ServerDeps, upload_dir: &Path, allowed_origins: &[String]) -> Router {
    let jwt_service = deps.jwt_service.clone();
    let app_state = AxumAppState {
        deps: Arc::new(deps),
    };

    let cors = CorsLayer::new()
        .allow_origin(cors_origins(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Intake carries file uploads; its body limit replaces axum's default
    let intake = Router::new()
        .route("/agriconnect", post(submit_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES));

    Router::new()
        // Auth
        .route("/admin/login", post(admin_login_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/reset-password", post(reset_password_handler))
        .route("/verify/:id", put(verify_user_handler))
        .route("/getUser", get(get_user_handler))
        // Submissions
        .merge(intake)
        .route("/submissions", get(list_submissions_handler))
        .route("/submissions/:id/approve", post(approve_handler))
        .route("/submissions/:id/reject", post(reject_handler))
        .route("/health", get(health_handler))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_origins(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.is_empty() {
        return AllowOrigin::from(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
