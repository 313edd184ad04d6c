//! Server dependencies (traits for testability)
//!
//! Central dependency container built once at startup and injected into
//! handlers and services. All external collaborators sit behind trait
//! objects so tests can substitute fakes; no module-level singletons.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::kernel::{BaseCompletion, BaseMovieStore, BaseRankingCatalog};

/// Server dependencies accessible to handlers and domain services
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Completion provider for review ranking resolution
    pub completion: Arc<dyn BaseCompletion>,
    /// Ranking catalog reader (sentinel entries already excluded)
    pub catalog: Arc<dyn BaseRankingCatalog>,
    /// Movie storage used by the review pipeline
    pub movies: Arc<dyn BaseMovieStore>,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        completion: Arc<dyn BaseCompletion>,
        catalog: Arc<dyn BaseRankingCatalog>,
        movies: Arc<dyn BaseMovieStore>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            db_pool,
            completion,
            catalog,
            movies,
            jwt_service,
        }
    }
}
