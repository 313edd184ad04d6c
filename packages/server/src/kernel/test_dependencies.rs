// Mock implementations for testing
//
// Call-recording fakes for the kernel traits, injectable wherever the real
// Postgres/OpenAI implementations would go. All state is behind Arc so a
// clone kept by the test observes calls made through the injected copy.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::traits::{BaseCompletion, BaseMovieStore, BaseRankingCatalog, CompletionError};
use crate::domains::movies::models::{RankingDefinition, UNRANKED_SENTINEL};

// =============================================================================
// Mock Completion Provider
// =============================================================================

#[derive(Clone, Default)]
pub struct MockCompletion {
    responses: Arc<Mutex<Vec<Result<String, CompletionError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion response
    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(Ok(text.to_string()));
        self
    }

    /// Queue a completion failure
    pub fn with_error(self, error: CompletionError) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    /// Get all prompts that were sent
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseCompletion for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(CompletionError::Provider(
                "no scripted completion response".to_string(),
            ))
        } else {
            responses.remove(0)
        }
    }
}

// =============================================================================
// Mock Ranking Catalog
// =============================================================================

#[derive(Clone, Default)]
pub struct MockRankingCatalog {
    definitions: Arc<Mutex<Vec<RankingDefinition>>>,
    fail: bool,
    load_calls: Arc<Mutex<usize>>,
}

impl MockRankingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the catalog. Sentinel entries may be included; `load_active`
    /// filters them like the real reader does.
    pub fn with_definitions(self, definitions: Vec<RankingDefinition>) -> Self {
        *self.definitions.lock().unwrap() = definitions;
        self
    }

    /// A catalog whose reads always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of load_active calls observed
    pub fn load_calls(&self) -> usize {
        *self.load_calls.lock().unwrap()
    }
}

#[async_trait]
impl BaseRankingCatalog for MockRankingCatalog {
    async fn load_active(&self) -> Result<Vec<RankingDefinition>> {
        *self.load_calls.lock().unwrap() += 1;

        if self.fail {
            return Err(anyhow!("ranking catalog read failed"));
        }

        Ok(self
            .definitions
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.ranking_value != UNRANKED_SENTINEL)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Mock Movie Store
// =============================================================================

#[derive(Clone, Default)]
pub struct MockMovieStore {
    known: Arc<Mutex<HashSet<String>>>,
    reviews: Arc<Mutex<HashMap<String, (String, RankingDefinition)>>>,
    exists_calls: Arc<Mutex<Vec<String>>>,
    apply_calls: Arc<Mutex<Vec<(String, String, RankingDefinition)>>>,
    fail_apply: bool,
}

impl MockMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a movie that exists (without a review)
    pub fn with_movie(self, imdb_id: &str) -> Self {
        self.known.lock().unwrap().insert(imdb_id.to_string());
        self
    }

    /// A store whose review writes always fail
    pub fn failing_apply(mut self) -> Self {
        self.fail_apply = true;
        self
    }

    /// Get all existence checks observed
    pub fn exists_calls(&self) -> Vec<String> {
        self.exists_calls.lock().unwrap().clone()
    }

    /// Get all review writes observed, in commit order
    pub fn apply_calls(&self) -> Vec<(String, String, RankingDefinition)> {
        self.apply_calls.lock().unwrap().clone()
    }

    /// Total storage operations observed (existence checks + writes)
    pub fn storage_calls(&self) -> usize {
        self.exists_calls.lock().unwrap().len() + self.apply_calls.lock().unwrap().len()
    }

    /// The currently stored review + ranking pair for a movie
    pub fn stored_review(&self, imdb_id: &str) -> Option<(String, RankingDefinition)> {
        self.reviews.lock().unwrap().get(imdb_id).cloned()
    }
}

#[async_trait]
impl BaseMovieStore for MockMovieStore {
    async fn exists(&self, imdb_id: &str) -> Result<bool> {
        self.exists_calls.lock().unwrap().push(imdb_id.to_string());
        Ok(self.known.lock().unwrap().contains(imdb_id))
    }

    async fn apply_review(
        &self,
        imdb_id: &str,
        review_text: &str,
        ranking: &RankingDefinition,
    ) -> Result<()> {
        if self.fail_apply {
            return Err(anyhow!("admin review update failed"));
        }

        if !self.known.lock().unwrap().contains(imdb_id) {
            return Err(anyhow!("admin review update matched 0 rows"));
        }

        self.apply_calls.lock().unwrap().push((
            imdb_id.to_string(),
            review_text.to_string(),
            ranking.clone(),
        ));
        self.reviews.lock().unwrap().insert(
            imdb_id.to_string(),
            (review_text.to_string(), ranking.clone()),
        );

        Ok(())
    }
}
