// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The review
// domain composes them; tests substitute the mocks in test_dependencies.

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domains::movies::models::RankingDefinition;

/// Completion adapter failures, kept apart from storage errors so the
/// boundary can report them distinctly.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion provider credential is not configured")]
    Auth,

    #[error("completion provider request failed: {0}")]
    Provider(String),
}

#[async_trait]
pub trait BaseCompletion: Send + Sync {
    /// Complete a prompt with the provider (returns raw text response).
    ///
    /// Exactly one request, one response; no retry, no streaming.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[async_trait]
pub trait BaseRankingCatalog: Send + Sync {
    /// Active ranking labels in catalog order, sentinel entries excluded.
    /// An empty catalog is an empty Vec, not an error.
    async fn load_active(&self) -> Result<Vec<RankingDefinition>>;
}

#[async_trait]
pub trait BaseMovieStore: Send + Sync {
    /// Check whether a movie with this IMDB id exists.
    async fn exists(&self, imdb_id: &str) -> Result<bool>;

    /// Set the admin review and its resolved ranking in one write.
    async fn apply_review(
        &self,
        imdb_id: &str,
        review_text: &str,
        ranking: &RankingDefinition,
    ) -> Result<()>;
}
