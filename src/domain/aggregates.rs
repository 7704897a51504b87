//! Summary statistics over a list of posts.
//!
//! Every function here is pure: it takes a snapshot slice and returns a
//! derived value. Results are deterministic for a given input order. Whenever
//! several candidates share the maximum, the one seen first in the input wins.
//!
//! # Example
//!
//! ```
//! use bloglist::domain::aggregates::{self, AuthorLikes, PostRecord};
//!
//! struct Entry(&'static str, i64);
//!
//! impl PostRecord for Entry {
//!     fn author(&self) -> &str { self.0 }
//!     fn likes(&self) -> i64 { self.1 }
//! }
//!
//! let posts = [Entry("A", 5), Entry("B", 10), Entry("A", 2)];
//!
//! assert_eq!(aggregates::total_likes(&posts), 17);
//! assert_eq!(aggregates::favorite_blog(&posts).map(|p| p.1), Some(10));
//! assert_eq!(
//!     aggregates::most_likes(&posts),
//!     Some(AuthorLikes { author: "B".to_string(), likes: 10 })
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::entities::Post;

/// The two fields of a post the statistics look at.
pub trait PostRecord {
    fn author(&self) -> &str;
    fn likes(&self) -> i64;
}

impl PostRecord for Post {
    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> i64 {
        self.likes
    }
}

/// Author with the largest number of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: usize,
}

/// Author with the largest summed likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: i64,
}

/// All statistics for one snapshot, as served by the reporting endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostsSummary<P> {
    pub post_count: usize,
    pub total_likes: i64,
    pub favorite: Option<P>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

/// Always 1.
pub fn dummy<T>(_posts: &[T]) -> i64 {
    1
}

/// Sum of likes over all posts; 0 for an empty slice.
///
/// Saturates at `i64::MAX` instead of overflowing.
pub fn total_likes<T: PostRecord>(posts: &[T]) -> i64 {
    posts
        .iter()
        .map(PostRecord::likes)
        .fold(0, i64::saturating_add)
}

/// The post with the most likes, or `None` for an empty slice.
pub fn favorite_blog<T: PostRecord>(posts: &[T]) -> Option<&T> {
    // Replace only on strictly greater so the leftmost maximum survives.
    posts.iter().fold(None, |best, post| match best {
        Some(current) if post.likes() <= current.likes() => Some(current),
        _ => Some(post),
    })
}

/// The author with the most posts, or `None` for an empty slice.
pub fn most_blogs<T: PostRecord>(posts: &[T]) -> Option<AuthorBlogs> {
    let groups = group_by_author(posts, |count: &mut usize, _| *count += 1);

    pick_max(groups).map(|(author, blogs)| AuthorBlogs {
        author: author.to_string(),
        blogs,
    })
}

/// The author whose posts have the most likes in total, or `None` for an
/// empty slice.
pub fn most_likes<T: PostRecord>(posts: &[T]) -> Option<AuthorLikes> {
    let groups = group_by_author(posts, |sum: &mut i64, post| {
        *sum = sum.saturating_add(post.likes())
    });

    pick_max(groups).map(|(author, likes)| AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

/// Computes every statistic over one snapshot.
pub fn summarize<T: PostRecord + Clone>(posts: &[T]) -> PostsSummary<T> {
    PostsSummary {
        post_count: posts.len(),
        total_likes: total_likes(posts),
        favorite: favorite_blog(posts).cloned(),
        most_blogs: most_blogs(posts),
        most_likes: most_likes(posts),
    }
}

/// Folds posts into per-author accumulators, ordered by each author's first
/// appearance in `posts`.
fn group_by_author<'a, T, A, F>(posts: &'a [T], mut step: F) -> Vec<(&'a str, A)>
where
    T: PostRecord,
    A: Default,
    F: FnMut(&mut A, &T),
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, A)> = Vec::new();

    for post in posts {
        let author = post.author();
        let slot = *index.entry(author).or_insert_with(|| {
            groups.push((author, A::default()));
            groups.len() - 1
        });
        step(&mut groups[slot].1, post);
    }

    groups
}

/// First group holding the maximum accumulator value.
fn pick_max<K, V: Ord>(groups: Vec<(K, V)>) -> Option<(K, V)> {
    groups.into_iter().fold(None, |best, group| match best {
        Some(current) if group.1 <= current.1 => Some(current),
        _ => Some(group),
    })
}
