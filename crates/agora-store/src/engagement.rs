use serde::Serialize;

use agora_types::{comment_content, Comment, PostId, UserId};

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryEntityStore;
use crate::traits::EntityStore;

/// A post's like set after a toggle, in ascending id order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LikeOutcome {
    pub likes: Vec<UserId>,
}

impl LikeOutcome {
    pub fn count(&self) -> usize {
        self.likes.len()
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.likes.contains(&user)
    }
}

/// Likes and comments.
#[derive(Clone, Copy, Debug)]
pub struct Engagement<'a> {
    store: &'a InMemoryEntityStore,
}

impl<'a> Engagement<'a> {
    pub fn new(store: &'a InMemoryEntityStore) -> Self {
        Self { store }
    }

    /// Like `post` as `user`, or remove the like if it is already there.
    ///
    /// `user` is not checked against the user collection.
    pub fn toggle_like(&self, post: PostId, user: UserId) -> StoreResult<LikeOutcome> {
        let (liked, outcome) = self.store.write(|c| {
            let entry = c.post_mut(post).ok_or(StoreError::PostNotFound(post))?;
            // `insert` is false when the like was already present.
            let liked = entry.likes.insert(user);
            if !liked {
                entry.likes.remove(&user);
            }
            Ok((
                liked,
                LikeOutcome {
                    likes: entry.likes.iter().copied().collect(),
                },
            ))
        })?;

        tracing::info!(post = %post, user = %user, liked, likes = outcome.count(), "like toggled");
        Ok(outcome)
    }

    /// Add a comment by `author` on `post`.
    ///
    /// Content is trimmed; whitespace-only content is a validation error and
    /// is reported before the post and author are looked up.
    pub fn add_comment(&self, post: PostId, author: UserId, content: &str) -> StoreResult<Comment> {
        let content = comment_content(content)?;
        self.store.create_comment(post, author, content)
    }
}
