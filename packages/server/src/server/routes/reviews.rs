use axum::extract::{Extension, Path};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::errors::ApiError;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

/// Hard cap on submitted review text, so prompts cannot grow without bound.
pub const MAX_REVIEW_LEN: usize = 8192;

#[derive(Debug, Deserialize)]
pub struct AdminReviewRequest {
    pub admin_review: String,
}

#[derive(Debug, Serialize)]
pub struct AdminReviewResponse {
    pub message: String,
    pub ranking_name: String,
    pub admin_review: String,
}

/// POST /review/{imdb_id}
///
/// Admin-only: resolves the free-text review to a ranking via the
/// completion provider and persists both in one write.
pub async fn admin_review_handler(
    Extension(state): Extension<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(imdb_id): Path<String>,
    Json(body): Json<AdminReviewRequest>,
) -> Result<Json<AdminReviewResponse>, ApiError> {
    if body.admin_review.trim().is_empty() {
        return Err(ApiError::InvalidPayload(
            "admin_review must not be empty".to_string(),
        ));
    }
    if body.admin_review.len() > MAX_REVIEW_LEN {
        return Err(ApiError::InvalidPayload(
            "admin_review exceeds the maximum length".to_string(),
        ));
    }

    let outcome = state
        .review_service
        .apply_admin_review(&imdb_id, &body.admin_review, auth.role)
        .await?;

    Ok(Json(AdminReviewResponse {
        message: "Admin review updated successfully".to_string(),
        ranking_name: outcome.ranking_name,
        admin_review: outcome.admin_review,
    }))
}
