use axum::{extract::Extension, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::errors::ApiError;
use crate::domains::auth::{hash_password, verify_password, Role, User};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
}

/// POST /register
pub async fn register_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let role = validate_register(&body)?;

    if User::email_exists(&body.email, &state.db_pool).await? {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let user = User {
        id: Uuid::new_v4(),
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
        password_hash: hash_password(&body.password),
        role: role.as_str().to_string(),
        token: None,
        refresh_token: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    user.insert(&state.db_pool).await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// POST /login
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::InvalidPayload(
            "email and password are required".to_string(),
        ));
    }

    let user = User::find_by_email(&body.email, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid email or password".to_string()))?;

    if !verify_password(&body.password, &user.password_hash) {
        return Err(ApiError::Unauthorized(
            "invalid email or password".to_string(),
        ));
    }

    let role = user
        .role()
        .ok_or_else(|| anyhow::anyhow!("user {} has an unknown role {:?}", user.id, user.role))?;

    let pair = state.jwt_service.create_token_pair(
        user.id,
        &user.email,
        &user.first_name,
        &user.last_name,
        role,
    )?;

    // The latest pair is stored on the user row, replacing any earlier one
    User::store_tokens(user.id, &pair.token, &pair.refresh_token, &state.db_pool).await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        token: pair.token,
        refresh_token: pair.refresh_token,
    }))
}

fn validate_register(body: &RegisterRequest) -> Result<Role, ApiError> {
    if body.email.trim().is_empty() || !body.email.contains('@') {
        return Err(ApiError::InvalidPayload(
            "email must be a valid address".to_string(),
        ));
    }
    if body.password.len() < 8 {
        return Err(ApiError::InvalidPayload(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
        return Err(ApiError::InvalidPayload(
            "first_name and last_name must not be empty".to_string(),
        ));
    }

    match body.role.as_deref() {
        None => Ok(Role::User),
        Some(role) => Role::parse(role)
            .ok_or_else(|| ApiError::InvalidPayload("role must be ADMIN or USER".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            email: "user@example.com".to_string(),
            password: "long enough password".to_string(),
            first_name: "Ursula".to_string(),
            last_name: "User".to_string(),
            role: None,
        }
    }

    #[test]
    fn test_register_defaults_to_user_role() {
        assert_eq!(validate_register(&request()).unwrap(), Role::User);
    }

    #[test]
    fn test_register_accepts_admin_role() {
        let mut body = request();
        body.role = Some("ADMIN".to_string());
        assert_eq!(validate_register(&body).unwrap(), Role::Admin);
    }

    #[test]
    fn test_register_rejects_unknown_role() {
        let mut body = request();
        body.role = Some("SUPERUSER".to_string());
        assert!(matches!(
            validate_register(&body),
            Err(ApiError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_register_rejects_short_password() {
        let mut body = request();
        body.password = "short".to_string();
        assert!(matches!(
            validate_register(&body),
            Err(ApiError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let mut body = request();
        body.email = "not-an-address".to_string();
        assert!(matches!(
            validate_register(&body),
            Err(ApiError::InvalidPayload(_))
        ));
    }
}
