use std::sync::Arc;

use serde::Serialize;

use super::resolver::ReviewResolver;
use crate::common::errors::ApiError;
use crate::domains::auth::models::Role;
use crate::kernel::BaseMovieStore;

/// Terminal success state of one review submission.
#[derive(Debug, Clone, Serialize)]
pub struct AdminReviewOutcome {
    pub ranking_name: String,
    pub admin_review: String,
}

/// Orchestrates one admin review submission: authorization, existence
/// check, resolution, then one atomic write of review + ranking.
///
/// Linear and unretried; every failure is terminal for the request. Two
/// concurrent submissions for the same movie race and the last successful
/// write wins.
pub struct ReviewService {
    resolver: ReviewResolver,
    movies: Arc<dyn BaseMovieStore>,
}

impl ReviewService {
    pub fn new(resolver: ReviewResolver, movies: Arc<dyn BaseMovieStore>) -> Self {
        Self { resolver, movies }
    }

    pub async fn apply_admin_review(
        &self,
        imdb_id: &str,
        review_text: &str,
        caller_role: Role,
    ) -> Result<AdminReviewOutcome, ApiError> {
        // Authorization first: no storage access for non-admin callers.
        if caller_role != Role::Admin {
            return Err(ApiError::AdminOnly);
        }

        if !self.movies.exists(imdb_id).await? {
            return Err(ApiError::NotFound("Movie"));
        }

        let ranking = self.resolver.resolve(review_text).await?;

        self.movies
            .apply_review(imdb_id, review_text, &ranking)
            .await?;

        tracing::info!(
            imdb_id,
            ranking_name = %ranking.ranking_name,
            ranking_value = ranking.ranking_value,
            "admin review applied"
        );

        Ok(AdminReviewOutcome {
            ranking_name: ranking.ranking_name,
            admin_review: review_text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::movies::models::RankingDefinition;
    use crate::domains::review::prompt::PromptTemplate;
    use crate::kernel::test_dependencies::{
        MockCompletion, MockMovieStore, MockRankingCatalog,
    };

    fn label(name: &str, value: i32) -> RankingDefinition {
        RankingDefinition {
            ranking_name: name.to_string(),
            ranking_value: value,
        }
    }

    fn service(
        completion: MockCompletion,
        catalog: MockRankingCatalog,
        movies: MockMovieStore,
    ) -> ReviewService {
        let resolver = ReviewResolver::new(
            Arc::new(catalog),
            Arc::new(completion),
            PromptTemplate::new("Pick one of: {rankings}. Review: ").unwrap(),
        );
        ReviewService::new(resolver, Arc::new(movies))
    }

    fn full_catalog() -> MockRankingCatalog {
        MockRankingCatalog::new().with_definitions(vec![
            label("Positive", 1),
            label("Negative", 2),
            label("Unranked", 999),
        ])
    }

    #[tokio::test]
    async fn test_success_persists_review_and_ranking_together() {
        let movies = MockMovieStore::new().with_movie("tt0111161");
        let service = service(
            MockCompletion::new().with_response("Positive"),
            full_catalog(),
            movies.clone(),
        );

        let outcome = service
            .apply_admin_review("tt0111161", "Great acting, loved it", Role::Admin)
            .await
            .unwrap();

        assert_eq!(outcome.ranking_name, "Positive");
        assert_eq!(outcome.admin_review, "Great acting, loved it");

        let applies = movies.apply_calls();
        assert_eq!(applies.len(), 1, "exactly one write");
        let (imdb_id, review, ranking) = &applies[0];
        assert_eq!(imdb_id, "tt0111161");
        assert_eq!(review, "Great acting, loved it");
        assert_eq!(*ranking, label("Positive", 1));
    }

    #[tokio::test]
    async fn test_non_admin_rejected_before_any_storage_access() {
        let movies = MockMovieStore::new().with_movie("tt0111161");
        let catalog = full_catalog();
        let service = service(
            MockCompletion::new().with_response("Positive"),
            catalog.clone(),
            movies.clone(),
        );

        let err = service
            .apply_admin_review("tt0111161", "review", Role::User)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::AdminOnly));
        assert_eq!(movies.storage_calls(), 0);
        assert_eq!(catalog.load_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_movie_is_not_found_and_not_updated() {
        let movies = MockMovieStore::new();
        let service = service(
            MockCompletion::new().with_response("Positive"),
            full_catalog(),
            movies.clone(),
        );

        let err = service
            .apply_admin_review("tt9999999", "review", Role::Admin)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound("Movie")));
        assert!(movies.apply_calls().is_empty());
    }

    #[tokio::test]
    async fn test_unresolved_ranking_writes_nothing() {
        let movies = MockMovieStore::new().with_movie("tt0111161");
        let service = service(
            MockCompletion::new().with_response("Somewhat favourable"),
            full_catalog(),
            movies.clone(),
        );

        let err = service
            .apply_admin_review("tt0111161", "review", Role::Admin)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Resolution(_)));
        assert!(movies.apply_calls().is_empty());
        assert_eq!(movies.stored_review("tt0111161"), None);
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_as_error() {
        let movies = MockMovieStore::new().with_movie("tt0111161").failing_apply();
        let service = service(
            MockCompletion::new().with_response("Positive"),
            full_catalog(),
            movies,
        );

        let err = service
            .apply_admin_review("tt0111161", "review", Role::Admin)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InternalError(_)));
    }
}
