//! PostgreSQL implementation of post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewPost, Post, PostOwner, PostPatch};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;
use serde_json::json;

/// Columns selected for every post query; `p` is the post row, `u` its owner.
const POST_COLUMNS: &str = r#"
    p.id, p.title, p.author, p.url, p.likes, p.created_at,
    p.user_id, u.username AS "owner_username", u.name AS "owner_name"
"#;

/// Joined post + owner row.
#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    author: String,
    url: String,
    likes: i64,
    created_at: DateTime<Utc>,
    user_id: Option<i64>,
    owner_username: Option<String>,
    owner_name: Option<String>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        let user = match (row.user_id, row.owner_username) {
            (Some(id), Some(username)) => Some(PostOwner {
                id,
                username,
                name: row.owner_name.unwrap_or_default(),
            }),
            _ => None,
        };

        Post {
            id: row.id,
            title: row.title,
            author: row.author,
            url: row.url,
            likes: row.likes,
            user,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for posts.
///
/// Owner data is joined from `users` on every read.
pub struct PgPostRepository {
    pool: Arc<PgPool>,
}

impl PgPostRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list(&self) -> Result<Vec<Post>, AppError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts p LEFT JOIN users u ON u.id = p.user_id ORDER BY p.id"
        );

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts p LEFT JOIN users u ON u.id = p.user_id WHERE p.id = $1"
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Post::from))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO posts (title, author, url, likes, user_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {POST_COLUMNS}
            FROM p
            LEFT JOIN users u ON u.id = p.user_id
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(&new_post.title)
            .bind(&new_post.author)
            .bind(&new_post.url)
            .bind(new_post.likes)
            .bind(new_post.user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, AppError> {
        let sql = format!(
            r#"
            WITH p AS (
                UPDATE posts
                SET title  = COALESCE($2, title),
                    author = COALESCE($3, author),
                    url    = COALESCE($4, url),
                    likes  = COALESCE($5, likes)
                WHERE id = $1
                RETURNING *
            )
            SELECT {POST_COLUMNS}
            FROM p
            LEFT JOIN users u ON u.id = p.user_id
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.author)
            .bind(patch.url)
            .bind(patch.likes)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Post::from)
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
