use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::ranking::RankingDefinition;

/// Movie model - SQL persistence layer
///
/// `admin_review`, `ranking_name` and `ranking_value` are only ever written
/// together, by `set_admin_review`.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Movie {
    pub id: Uuid,
    pub imdb_id: String,
    pub title: String,
    pub genre: String,
    pub release_year: i32,
    pub admin_review: Option<String>,
    pub ranking_name: Option<String>,
    pub ranking_value: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    /// The resolved ranking pair, if an admin review has been applied.
    pub fn ranking(&self) -> Option<RankingDefinition> {
        match (&self.ranking_name, self.ranking_value) {
            (Some(name), Some(value)) => Some(RankingDefinition {
                ranking_name: name.clone(),
                ranking_value: value,
            }),
            _ => None,
        }
    }

    /// Find all movies, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM movies ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    /// Find movie by IMDB id
    pub async fn find_by_imdb_id(imdb_id: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM movies WHERE imdb_id = $1")
            .bind(imdb_id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a movie with this IMDB id exists
    pub async fn exists(imdb_id: &str, pool: &PgPool) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movies WHERE imdb_id = $1)")
            .bind(imdb_id)
            .fetch_one(pool)
            .await
    }

    /// Insert new movie
    pub async fn insert(&self, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO movies (id, imdb_id, title, genre, release_year)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.imdb_id)
        .bind(&self.title)
        .bind(&self.genre)
        .bind(self.release_year)
        .fetch_one(pool)
        .await
    }

    /// Set the admin review and its resolved ranking in one UPDATE.
    ///
    /// Returns the number of matched rows (0 when the movie is gone).
    pub async fn set_admin_review(
        imdb_id: &str,
        review_text: &str,
        ranking: &RankingDefinition,
        pool: &PgPool,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movies
             SET admin_review = $2, ranking_name = $3, ranking_value = $4, updated_at = NOW()
             WHERE imdb_id = $1",
        )
        .bind(imdb_id)
        .bind(review_text)
        .bind(&ranking.ranking_name)
        .bind(ranking.ranking_value)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
