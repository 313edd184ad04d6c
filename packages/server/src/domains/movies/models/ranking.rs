use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Catalog value marking a label as excluded from active resolution
/// (e.g. the "Unranked" placeholder).
pub const UNRANKED_SENTINEL: i32 = 999;

/// One named, numerically-scored label from the ranking catalog.
///
/// Value 0 is reserved to mean "unresolved" and never appears in the
/// catalog.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingDefinition {
    pub ranking_name: String,
    pub ranking_value: i32,
}

impl RankingDefinition {
    /// Active ranking labels in catalog order, sentinel entries excluded.
    ///
    /// An empty catalog returns an empty Vec, not an error; callers decide
    /// what "no labels available" means.
    pub async fn load_active(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT ranking_name, ranking_value FROM rankings
             WHERE ranking_value <> $1
             ORDER BY id",
        )
        .bind(UNRANKED_SENTINEL)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_serialization() {
        let ranking = RankingDefinition {
            ranking_name: "Positive".to_string(),
            ranking_value: 1,
        };

        let json = serde_json::to_value(&ranking).unwrap();
        assert_eq!(json["ranking_name"], "Positive");
        assert_eq!(json["ranking_value"], 1);
    }

    #[tokio::test]
    #[ignore] // Requires a database with migrations applied
    async fn test_load_active_excludes_sentinel() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = sqlx::PgPool::connect(&url).await.unwrap();

        let labels = RankingDefinition::load_active(&pool).await.unwrap();

        assert!(!labels.is_empty());
        assert!(labels.iter().all(|l| l.ranking_value != UNRANKED_SENTINEL));
    }
}
