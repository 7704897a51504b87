//! Handlers for post endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::post::{CreatePostRequest, PostResponse, UpdatePostRequest};
use crate::application::services::AuthenticatedUser;
use crate::domain::entities::PostPatch;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every post with its owner.
///
/// # Endpoint
///
/// `GET /api/posts`
pub async fn list_posts_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.post_service.list_posts().await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Returns one post.
///
/// # Endpoint
///
/// `GET /api/posts/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no post has this id.
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, AppError> {
    let post = state.post_service.get_post(id).await?;

    Ok(Json(post.into()))
}

/// Creates a post owned by the authenticated user.
///
/// # Endpoint
///
/// `POST /api/posts` (bearer token required)
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Type wars",
///   "author": "Robert C. Martin",
///   "url": "http://blog.cleancoder.com/uncle-bob/2016/05/01/TypeWars.html",
///   "likes": 2
/// }
/// ```
///
/// `likes` may be omitted and defaults to 0.
///
/// # Errors
///
/// Returns 400 Bad Request if a required field is missing or invalid.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let post = state
        .post_service
        .create_post(&caller, payload.into())
        .await?;
    state.stats_service.invalidate().await;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Partially updates a post. Any authenticated user may update any post.
///
/// # Endpoint
///
/// `PUT /api/posts/{id}` (bearer token required)
///
/// # Errors
///
/// Returns 400 Bad Request if the body is empty or invalid.
/// Returns 404 Not Found if no post has this id.
pub async fn update_post_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<PostResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let post = state
        .post_service
        .update_post(id, PostPatch::from(payload))
        .await?;
    state.stats_service.invalidate().await;

    tracing::debug!(post_id = id, user_id = caller.id, "Post updated via API");

    Ok(Json(post.into()))
}

/// Deletes a post.
///
/// # Endpoint
///
/// `DELETE /api/posts/{id}` (bearer token required)
///
/// # Errors
///
/// Returns 403 Forbidden if another user created the post.
/// Returns 404 Not Found if no post has this id.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.post_service.delete_post(id, &caller).await?;
    state.stats_service.invalidate().await;

    Ok(StatusCode::NO_CONTENT)
}
