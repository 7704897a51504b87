//! Handler for the post list summary.

use axum::{Json, extract::State};

use crate::api::dto::stats::SummaryResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns summary statistics over all posts.
///
/// # Endpoint
///
/// `GET /api/posts/stats`
///
/// # Response
///
/// ```json
/// {
///   "post_count": 6,
///   "total_likes": 36,
///   "favorite": { "id": 3, "title": "Canonical string reduction", "likes": 12, ... },
///   "most_blogs": { "author": "Robert C. Martin", "blogs": 3 },
///   "most_likes": { "author": "Edsger W. Dijkstra", "likes": 17 }
/// }
/// ```
///
/// Ties go to the post or author that appears first in the list.
pub async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = state.stats_service.summary().await?;

    Ok(Json(summary.into()))
}
