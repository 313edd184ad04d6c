use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{middleware::Next, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::domains::auth::{JwtService, Role};

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// JWT authentication middleware
///
/// Extracts the JWT from the Authorization header, verifies it, and adds
/// AuthUser to request extensions. With no token or an invalid token the
/// request continues without AuthUser (public access); `require_auth`
/// gates the protected routes.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(&request, &jwt_service) {
        debug!("Authenticated user: {} ({})", user.email, user.role);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Reject requests that did not authenticate
pub async fn require_auth(
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if request.extensions().get::<AuthUser>().is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized: valid bearer token required" })),
        )
            .into_response();
    }

    next.run(request).await
}

/// Extract and verify the JWT from a request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Handle both "Bearer <token>" and raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;

    // Tokens carrying a role outside the closed set are not trusted
    let role = Role::parse(&claims.role)?;

    Some(AuthUser {
        user_id: claims.user_id,
        email: claims.email,
        role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_service() -> JwtService {
        JwtService::new("test_secret", "test_refresh", "test_issuer".to_string())
    }

    fn token_for(service: &JwtService, role: Role) -> String {
        service
            .create_token_pair(Uuid::new_v4(), "a@example.com", "Ada", "Admin", role)
            .unwrap()
            .token
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let service = jwt_service();
        let token = token_for(&service, Role::Admin);

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &service).unwrap();
        assert!(auth_user.is_admin());
        assert_eq!(auth_user.email, "a@example.com");
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let service = jwt_service();
        let token = token_for(&service, Role::User);

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &service).unwrap();
        assert!(!auth_user.is_admin());
    }

    #[test]
    fn test_no_auth_header() {
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &jwt_service()).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &jwt_service()).is_none());
    }
}
