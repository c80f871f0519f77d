//! Auth routes: admin login, registration, login, password reset, user
//! verification, and the current user's name.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{Actor, AdminCapability, AppError, AppResult, UserId};
use crate::domains::auth::actions::{self, Registration};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub mobile_number: String,
    pub password: String,
    #[serde(default)]
    pub village: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub mobile_number: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub mobile_number: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub verified: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: UserId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserNameResponse {
    pub name: String,
}

/// Unwrap a JSON body, turning malformed or incomplete bodies into a 400
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// Parse a numeric path id
pub(crate) fn parse_id<T>(raw: &str) -> AppResult<crate::common::Id<T>> {
    crate::common::Id::parse(raw).map_err(|_| AppError::Validation(format!("Invalid id: {raw}")))
}

/// POST /admin/login
pub async fn admin_login_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let req = json_body(body)?;
    let token = actions::admin_login(&req.email, &req.password, &state.deps).await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /register
pub async fn register_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let req = json_body(body)?;
    let registration = Registration {
        name: req.name,
        mobile_number: req.mobile_number,
        password: req.password,
        village: req.village,
        district: req.district,
        state: req.state,
    };

    let user_id = actions::register_user(registration, &state.deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id,
        }),
    ))
}

/// POST /login
pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let req = json_body(body)?;
    let token = actions::login_user(&req.mobile_number, &req.password, &state.deps).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// POST /reset-password
pub async fn reset_password_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let req = json_body(body)?;
    actions::reset_password(&req.mobile_number, &req.new_password, &state.deps).await?;
    Ok(MessageResponse::new("Password reset successfully"))
}

/// PUT /verify/:id (admin: `VerifyUsers`)
pub async fn verify_user_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    Actor::from_claims(&auth.claims)
        .can(AdminCapability::VerifyUsers)
        .check()?;

    let user_id: UserId = parse_id(&id)?;
    let req = json_body(body)?;
    actions::verify_user(user_id, req.verified, &state.deps).await?;
    Ok(MessageResponse::new("User verified successfully!"))
}

/// GET /getUser
pub async fn get_user_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
) -> AppResult<Json<UserNameResponse>> {
    let name = actions::get_user_name(&auth.claims, &state.deps).await?;
    Ok(Json(UserNameResponse { name }))
}
