//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{Login, Register, User},
    AppState,
};

/// Successful login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token
    pub token: String,
    pub user_id: i32,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = Login,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials or inactive account")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Login>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state.services.auth.login(&payload.email, &payload.password).await?;

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        full_name: user.full_name(),
        email: user.email,
        role: user.role.to_string(),
    }))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = Register,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Email or university ID already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Register>,
) -> AppResult<(StatusCode, Json<User>)> {
    payload.validate()?;

    let user = state.services.auth.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
