use thiserror::Error;

use crate::domains::movies::models::RankingDefinition;

/// Token replaced with the comma-joined active label names.
pub const LABELS_PLACEHOLDER: &str = "{rankings}";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("prompt template is missing the {{rankings}} placeholder")]
    MissingPlaceholder,
}

/// Completion prompt template.
///
/// Construction fails when the placeholder is absent, so a malformed
/// template is caught at configuration load rather than producing prompts
/// without the label list.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        if !template.contains(LABELS_PLACEHOLDER) {
            return Err(TemplateError::MissingPlaceholder);
        }
        Ok(Self { template })
    }

    /// Build the completion prompt: label names comma-joined (no trailing
    /// comma) substituted for the placeholder once, then the raw review
    /// text appended with no separator.
    pub fn render(&self, labels: &[RankingDefinition], review_text: &str) -> String {
        let joined = labels
            .iter()
            .map(|label| label.ranking_name.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let mut prompt = self.template.replacen(LABELS_PLACEHOLDER, &joined, 1);
        prompt.push_str(review_text);
        prompt
    }
}
