use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Default prompt sent to the completion provider. `{rankings}` is replaced
/// with the comma-joined active label names; the admin review text is
/// appended directly after the template.
const DEFAULT_PROMPT_TEMPLATE: &str = "You are a film review classifier. \
Classify the following review as exactly one of these rankings and respond \
with that single word only: {rankings}. Review: ";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Credential for the completion provider. Optional: without it the
    /// catalog and CRUD endpoints still work, and review resolution fails
    /// with an auth error on first use.
    pub openai_api_key: Option<String>,
    pub prompt_template: String,
    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    pub jwt_issuer: String,
    /// Wall-clock budget for a single request, including storage and
    /// completion-provider calls.
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            prompt_template: env::var("BASE_PROMPT_TEMPLATE")
                .unwrap_or_else(|_| DEFAULT_PROMPT_TEMPLATE.to_string()),
            jwt_secret: env::var("JWT_SECRET_KEY").context("JWT_SECRET_KEY must be set")?,
            jwt_refresh_secret: env::var("JWT_REFRESH_KEY").context("JWT_REFRESH_KEY must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "MovieStream".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
        })
    }
}
