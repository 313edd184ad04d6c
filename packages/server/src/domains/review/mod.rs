//! Admin review ranking pipeline.
//!
//! An admin's free-text review is sent, together with the active ranking
//! labels, to the completion provider; the response is mapped back onto one
//! catalog label and persisted with the review in a single write.

pub mod prompt;
pub mod resolver;
pub mod service;

pub use prompt::{PromptTemplate, TemplateError, LABELS_PLACEHOLDER};
pub use resolver::{ResolveError, ReviewResolver, MAX_MATCH_LEN};
pub use service::{AdminReviewOutcome, ReviewService};
