// Postgres-backed implementations of the storage traits, delegating to the
// domain models.

use anyhow::{ensure, Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::{BaseMovieStore, BaseRankingCatalog};
use crate::domains::movies::models::{Movie, RankingDefinition};

pub struct PgRankingCatalog {
    pool: PgPool,
}

impl PgRankingCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseRankingCatalog for PgRankingCatalog {
    async fn load_active(&self) -> Result<Vec<RankingDefinition>> {
        RankingDefinition::load_active(&self.pool)
            .await
            .context("failed to load ranking catalog")
    }
}

pub struct PgMovieStore {
    pool: PgPool,
}

impl PgMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseMovieStore for PgMovieStore {
    async fn exists(&self, imdb_id: &str) -> Result<bool> {
        Movie::exists(imdb_id, &self.pool)
            .await
            .context("failed to check for existing movie")
    }

    async fn apply_review(
        &self,
        imdb_id: &str,
        review_text: &str,
        ranking: &RankingDefinition,
    ) -> Result<()> {
        let matched = Movie::set_admin_review(imdb_id, review_text, ranking, &self.pool)
            .await
            .context("failed to update admin review")?;

        ensure!(matched == 1, "admin review update matched {matched} rows");
        Ok(())
    }
}
