use std::sync::Arc;

use thiserror::Error;

use super::prompt::PromptTemplate;
use crate::domains::movies::models::RankingDefinition;
use crate::kernel::{BaseCompletion, BaseRankingCatalog, CompletionError};

/// Longest completion text that can still name a catalog label. Longer
/// responses are treated as unresolvable without scanning them.
pub const MAX_MATCH_LEN: usize = 256;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no active ranking labels are configured")]
    NoLabels,

    #[error("completion did not match any ranking label: {0:?}")]
    Unresolved(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("failed to load ranking catalog: {0}")]
    Catalog(#[source] anyhow::Error),
}

/// Maps free-text review content onto one catalog label via the completion
/// provider.
///
/// The label set is loaded from the catalog on every call, so catalog edits
/// take effect on the next resolution.
pub struct ReviewResolver {
    catalog: Arc<dyn BaseRankingCatalog>,
    completion: Arc<dyn BaseCompletion>,
    template: PromptTemplate,
}

impl ReviewResolver {
    pub fn new(
        catalog: Arc<dyn BaseRankingCatalog>,
        completion: Arc<dyn BaseCompletion>,
        template: PromptTemplate,
    ) -> Self {
        Self {
            catalog,
            completion,
            template,
        }
    }

    /// Resolve review text to a ranking.
    ///
    /// The completion text is trimmed and compared case-insensitively
    /// against the active label names in catalog order; first match wins.
    /// A response matching no label fails - it is never defaulted, and the
    /// sentinel is never offered.
    pub async fn resolve(&self, review_text: &str) -> Result<RankingDefinition, ResolveError> {
        let labels = self
            .catalog
            .load_active()
            .await
            .map_err(ResolveError::Catalog)?;

        if labels.is_empty() {
            return Err(ResolveError::NoLabels);
        }

        let prompt = self.template.render(&labels, review_text);
        tracing::debug!(
            label_count = labels.len(),
            prompt_length = prompt.len(),
            "requesting ranking completion"
        );

        let response = self.completion.complete(&prompt).await?;
        let candidate = response.trim();

        if candidate.is_empty() || candidate.len() > MAX_MATCH_LEN {
            return Err(ResolveError::Unresolved(preview(candidate)));
        }

        match labels
            .iter()
            .find(|label| label.ranking_name.eq_ignore_ascii_case(candidate))
        {
            Some(label) => {
                tracing::info!(
                    ranking_name = %label.ranking_name,
                    ranking_value = label.ranking_value,
                    "resolved review ranking"
                );
                Ok(label.clone())
            }
            None => Err(ResolveError::Unresolved(preview(candidate))),
        }
    }
}

/// Bounded copy of provider text for error messages.
fn preview(text: &str) -> String {
    text.chars().take(64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockCompletion, MockRankingCatalog};

    fn label(name: &str, value: i32) -> RankingDefinition {
        RankingDefinition {
            ranking_name: name.to_string(),
            ranking_value: value,
        }
    }

    fn catalog() -> Vec<RankingDefinition> {
        vec![
            label("Positive", 1),
            label("Negative", 2),
            label("Unranked", 999),
        ]
    }

    fn resolver(
        catalog: MockRankingCatalog,
        completion: MockCompletion,
    ) -> ReviewResolver {
        ReviewResolver::new(
            Arc::new(catalog),
            Arc::new(completion),
            PromptTemplate::new("Pick one of: {rankings}. Review: ").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_exact_match() {
        let resolver = resolver(
            MockRankingCatalog::new().with_definitions(catalog()),
            MockCompletion::new().with_response("Positive"),
        );

        let ranking = resolver.resolve("Great acting, loved it").await.unwrap();
        assert_eq!(ranking, label("Positive", 1));
    }

    #[tokio::test]
    async fn test_match_is_case_insensitive_and_whitespace_tolerant() {
        let resolver = resolver(
            MockRankingCatalog::new().with_definitions(catalog()),
            MockCompletion::new().with_response(" pOsItIvE \n"),
        );

        let ranking = resolver.resolve("review").await.unwrap();
        assert_eq!(ranking.ranking_name, "Positive");
        assert_eq!(ranking.ranking_value, 1);
    }

    #[tokio::test]
    async fn test_canonical_name_returned_not_provider_spelling() {
        let resolver = resolver(
            MockRankingCatalog::new().with_definitions(catalog()),
            MockCompletion::new().with_response("NEGATIVE"),
        );

        let ranking = resolver.resolve("review").await.unwrap();
        assert_eq!(ranking.ranking_name, "Negative");
    }

    #[tokio::test]
    async fn test_unmatched_response_is_unresolved() {
        let resolver = resolver(
            MockRankingCatalog::new().with_definitions(catalog()),
            MockCompletion::new().with_response("Mostly favourable"),
        );

        let err = resolver.resolve("review").await.unwrap_err();
        assert!(matches!(err, ResolveError::Unresolved(_)));
    }

    #[tokio::test]
    async fn test_sentinel_label_never_matches() {
        let resolver = resolver(
            MockRankingCatalog::new().with_definitions(catalog()),
            MockCompletion::new().with_response("Unranked"),
        );

        let err = resolver.resolve("review").await.unwrap_err();
        assert!(matches!(err, ResolveError::Unresolved(_)));
    }

    #[tokio::test]
    async fn test_empty_catalog_fails_before_completion() {
        let completion = MockCompletion::new().with_response("Positive");
        let resolver = resolver(MockRankingCatalog::new(), completion.clone());

        let err = resolver.resolve("review").await.unwrap_err();
        assert!(matches!(err, ResolveError::NoLabels));
        assert!(completion.calls().is_empty(), "no completion call expected");
    }

    #[tokio::test]
    async fn test_prompt_contains_active_labels_only() {
        let completion = MockCompletion::new().with_response("Positive");
        let resolver = resolver(
            MockRankingCatalog::new().with_definitions(catalog()),
            completion.clone(),
        );

        resolver.resolve("Great acting, loved it").await.unwrap();

        let prompts = completion.calls();
        assert_eq!(prompts.len(), 1);
        assert_eq!(
            prompts[0],
            "Pick one of: Positive,Negative. Review: Great acting, loved it"
        );
    }

    #[tokio::test]
    async fn test_oversized_response_is_unresolved() {
        let resolver = resolver(
            MockRankingCatalog::new().with_definitions(catalog()),
            MockCompletion::new().with_response(&"Positive ".repeat(100)),
        );

        let err = resolver.resolve("review").await.unwrap_err();
        assert!(matches!(err, ResolveError::Unresolved(_)));
    }

    #[tokio::test]
    async fn test_completion_failure_propagates() {
        let resolver = resolver(
            MockRankingCatalog::new().with_definitions(catalog()),
            MockCompletion::new().with_error(CompletionError::Auth),
        );

        let err = resolver.resolve("review").await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Completion(CompletionError::Auth)
        ));
    }

    #[tokio::test]
    async fn test_catalog_failure_propagates() {
        let resolver = resolver(
            MockRankingCatalog::failing(),
            MockCompletion::new().with_response("Positive"),
        );

        let err = resolver.resolve("review").await.unwrap_err();
        assert!(matches!(err, ResolveError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_catalog_order_breaks_ties() {
        // Both labels match case-insensitively; the first in catalog order wins.
        let resolver = resolver(
            MockRankingCatalog::new()
                .with_definitions(vec![label("Positive", 1), label("POSITIVE", 7)]),
            MockCompletion::new().with_response("positive"),
        );

        let ranking = resolver.resolve("review").await.unwrap();
        assert_eq!(ranking.ranking_value, 1);
    }
}
