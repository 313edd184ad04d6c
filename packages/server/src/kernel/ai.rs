// Completion implementation using OpenAI
//
// Infrastructure implementation of BaseCompletion. What to prompt for
// lives in the review domain.

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};

use super::traits::{BaseCompletion, CompletionError};

/// Default model for review ranking completions.
pub const COMPLETION_MODEL: &str = "gpt-4o-mini";

/// OpenAI-backed completion adapter.
///
/// Built without a credential it still constructs; the missing key
/// surfaces as `CompletionError::Auth` on first use, so the rest of the
/// API keeps working without a provider account.
pub struct OpenAiCompletion {
    client: Option<OpenAIClient>,
    model: String,
}

impl OpenAiCompletion {
    pub fn new(api_key: Option<String>) -> Self {
        let client = api_key.filter(|k| !k.is_empty()).map(OpenAIClient::new);
        Self {
            client,
            model: COMPLETION_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl BaseCompletion for OpenAiCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let client = self.client.as_ref().ok_or(CompletionError::Auth)?;

        tracing::debug!(
            prompt_length = prompt.len(),
            model = %self.model,
            "calling completion provider"
        );

        let request = ChatRequest::new(&self.model).message(Message::user(prompt));

        let response = client.chat_completion(request).await.map_err(|e| match e {
            OpenAIError::Config(message) => {
                tracing::error!(error = %message, "completion provider misconfigured");
                CompletionError::Auth
            }
            other => CompletionError::Provider(other.to_string()),
        })?;

        Ok(response.content)
    }
}
