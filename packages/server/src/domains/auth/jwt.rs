use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::Role;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,        // Subject (user id as string)
    pub user_id: Uuid,      // User UUID
    pub email: String,      // Email (for logging/debugging)
    pub first_name: String,
    pub last_name: String,
    pub role: String,       // "ADMIN" | "USER"
    pub exp: i64,           // Expiration timestamp
    pub iat: i64,           // Issued at timestamp
    pub iss: String,        // Issuer
    pub jti: String,        // JWT ID (unique token identifier)
}

/// Access + refresh token pair issued at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// JWT Service - creates and verifies JWT tokens
///
/// Access tokens expire after 24 hours; refresh tokens after 7 days and are
/// signed with a separate secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    issuer: String,
}

impl JwtService {
    pub fn new(secret: &str, refresh_secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            refresh_encoding_key: EncodingKey::from_secret(refresh_secret.as_bytes()),
            issuer,
        }
    }

    /// Create the access + refresh token pair for a user
    pub fn create_token_pair(
        &self,
        user_id: Uuid,
        email: &str,
        first_name: &str,
        last_name: &str,
        role: Role,
    ) -> Result<TokenPair> {
        let token = self.sign(
            user_id,
            email,
            first_name,
            last_name,
            role,
            chrono::Duration::hours(24),
            &self.encoding_key,
        )?;
        let refresh_token = self.sign(
            user_id,
            email,
            first_name,
            last_name,
            role,
            chrono::Duration::days(7),
            &self.refresh_encoding_key,
        )?;

        Ok(TokenPair {
            token,
            refresh_token,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn sign(
        &self,
        user_id: Uuid,
        email: &str,
        first_name: &str,
        last_name: &str,
        role: Role,
        lifetime: chrono::Duration,
        key: &EncodingKey,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: role.as_str().to_string(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, key).map_err(Into::into)
    }

    /// Verify and decode an access token
    ///
    /// Returns claims if the token is valid, issued by us, and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret", "test_refresh_secret", "test_issuer".to_string())
    }

    #[test]
    fn test_create_and_verify_token() {
        let service = service();
        let user_id = Uuid::new_v4();

        let pair = service
            .create_token_pair(user_id, "a@example.com", "Ada", "Admin", Role::Admin)
            .unwrap();

        let claims = service.verify_token(&pair.token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.role, "ADMIN");
        assert_eq!(claims.iss, "test_issuer");
    }

    #[test]
    fn test_refresh_token_not_valid_as_access_token() {
        let service = service();
        let pair = service
            .create_token_pair(Uuid::new_v4(), "a@example.com", "Ada", "Admin", Role::User)
            .unwrap();

        // Signed with the refresh secret, so access-token verification fails
        assert!(service.verify_token(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_invalid_token() {
        assert!(service().verify_token("invalid_token").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new("secret1", "refresh1", "test_issuer".to_string());
        let service2 = JwtService::new("secret2", "refresh2", "test_issuer".to_string());

        let pair = service1
            .create_token_pair(Uuid::new_v4(), "a@example.com", "Ada", "Admin", Role::User)
            .unwrap();

        assert!(service2.verify_token(&pair.token).is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let issuing = JwtService::new("secret", "refresh", "issuer_a".to_string());
        let verifying = JwtService::new("secret", "refresh", "issuer_b".to_string());

        let pair = issuing
            .create_token_pair(Uuid::new_v4(), "a@example.com", "Ada", "Admin", Role::User)
            .unwrap();

        assert!(verifying.verify_token(&pair.token).is_err());
    }

    #[test]
    fn test_token_lifetime() {
        let service = service();
        let pair = service
            .create_token_pair(Uuid::new_v4(), "a@example.com", "Ada", "Admin", Role::User)
            .unwrap();

        let claims = service.verify_token(&pair.token).unwrap();
        let now = chrono::Utc::now().timestamp();
        let expires_in = claims.exp - now;
        assert!(expires_in > 23 * 3600);
        assert!(expires_in <= 24 * 3600);
    }
}
