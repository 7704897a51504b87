//! DTO for the post list summary.

use serde::{Deserialize, Serialize};

use super::post::PostResponse;
use crate::domain::aggregates::{AuthorBlogs, AuthorLikes, PostsSummary};
use crate::domain::entities::Post;

/// Response for `GET /api/posts/stats`.
///
/// Optional fields are `null` when there are no posts.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub post_count: usize,
    pub total_likes: i64,
    pub favorite: Option<PostResponse>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

impl From<PostsSummary<Post>> for SummaryResponse {
    fn from(summary: PostsSummary<Post>) -> Self {
        Self {
            post_count: summary.post_count,
            total_likes: summary.total_likes,
            favorite: summary.favorite.map(PostResponse::from),
            most_blogs: summary.most_blogs,
            most_likes: summary.most_likes,
        }
    }
}
