use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{bearer_token, RequireAdmin};
use crate::constants::API_NAME;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/register", post(register))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    username: Option<String>,
    password: Option<String>,
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let username = body.username.as_deref().unwrap_or("").trim().to_lowercase();
    let password = body.password.as_deref().unwrap_or("");
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Username and password required".to_string()));
    }

    let admin = state
        .admins
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Username not found".to_string()))?;

    let password_ok =
        bcrypt::verify(password, &admin.password_hash).map_err(anyhow::Error::from)?;
    if !password_ok {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let token = state.tokens.issue(admin.id);
    tracing::info!("{} Admin '{}' logged in", API_NAME, admin.username);

    Ok(Json(json!({ "success": true, "token": token })))
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    if let Some(token) = bearer_token(&headers) {
        state.tokens.revoke(token);
    }
    Json(json!({ "success": true }))
}

async fn me(_admin: RequireAdmin) -> Json<serde_json::Value> {
    Json(json!({ "admin": true }))
}

/// Add another admin (only existing admins).
async fn register(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let username = body.username.as_deref().unwrap_or("").trim().to_lowercase();
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    let password = body.password.as_deref().unwrap_or("");
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if state.admins.find_by_username(&username).await?.is_some() {
        return Err(AppError::Validation("Username already taken".to_string()));
    }

    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(anyhow::Error::from)?;
    state.admins.insert(&username, &hash).await?;

    tracing::info!("{} Admin '{}' created by {}", API_NAME, username, admin.admin_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Admin created" })),
    ))
}
