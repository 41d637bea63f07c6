use std::sync::RwLock;

use agora_types::{Comment, Post, PostDraft, PostId, Timestamp, User, UserId, UserProfile};

use crate::collections::Collections;
use crate::error::{StoreError, StoreResult};
use crate::traits::EntityStore;

/// In-memory entity store behind a single `RwLock`.
///
/// The lock covers all three collections, so every mutation is serialized
/// against every other mutation and against multi-entity reads. Entities are
/// cloned on the way out.
pub struct InMemoryEntityStore {
    inner: RwLock<Collections>,
}

impl InMemoryEntityStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::from_collections(Collections::new())
    }

    pub fn from_collections(collections: Collections) -> Self {
        Self {
            inner: RwLock::new(collections),
        }
    }

    /// Run `f` against a consistent read-only view of all collections.
    ///
    /// No writer can interleave while `f` runs.
    pub fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> StoreResult<R> {
        let guard = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&guard))
    }

    /// Run `f` with exclusive access. `f` must validate before mutating.
    pub(crate) fn write<R>(
        &self,
        f: impl FnOnce(&mut Collections) -> StoreResult<R>,
    ) -> StoreResult<R> {
        let mut guard = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        f(&mut guard)
    }

    /// Number of users currently stored.
    pub fn user_count(&self) -> StoreResult<usize> {
        self.read(Collections::user_count)
    }

    /// Number of posts currently stored.
    pub fn post_count(&self) -> StoreResult<usize> {
        self.read(Collections::post_count)
    }

    /// Number of comments across all posts.
    pub fn comment_count(&self) -> StoreResult<usize> {
        self.read(Collections::total_comments)
    }

    /// Returns `true` if no entity of any kind is stored.
    pub fn is_empty(&self) -> StoreResult<bool> {
        self.read(|c| c.user_count() == 0 && c.post_count() == 0 && c.total_comments() == 0)
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore for InMemoryEntityStore {
    fn create_user(&self, profile: UserProfile) -> StoreResult<User> {
        let user = self.write(|c| Ok(c.insert_user(profile).clone()))?;
        tracing::info!(user = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    fn get_user(&self, id: UserId) -> StoreResult<User> {
        self.read(|c| c.user(id).cloned())?
            .ok_or(StoreError::UserNotFound(id))
    }

    fn list_users(&self) -> StoreResult<Vec<User>> {
        self.read(|c| c.users().cloned().collect())
    }

    fn update_user(&self, id: UserId, profile: UserProfile) -> StoreResult<User> {
        let user = self.write(|c| {
            let user = c.user_mut(id).ok_or(StoreError::UserNotFound(id))?;
            user.apply_profile(profile);
            Ok(user.clone())
        })?;
        tracing::info!(user = %id, "user updated");
        Ok(user)
    }

    fn create_post(&self, draft: PostDraft) -> StoreResult<Post> {
        let post = self.write(|c| {
            if c.user(draft.user_id).is_none() {
                return Err(StoreError::UserNotFound(draft.user_id));
            }
            Ok(c.insert_post(draft, Timestamp::now()).clone())
        })?;
        tracing::info!(post = %post.id, author = %post.user_id, "post created");
        Ok(post)
    }

    fn get_post(&self, id: PostId) -> StoreResult<Post> {
        self.read(|c| c.post(id).cloned())?
            .ok_or(StoreError::PostNotFound(id))
    }

    fn list_posts(&self) -> StoreResult<Vec<Post>> {
        self.read(|c| c.posts().cloned().collect())
    }

    fn create_comment(
        &self,
        post_id: PostId,
        user_id: UserId,
        content: String,
    ) -> StoreResult<Comment> {
        let comment = self.write(|c| {
            if c.post(post_id).is_none() {
                return Err(StoreError::PostNotFound(post_id));
            }
            if c.user(user_id).is_none() {
                return Err(StoreError::UserNotFound(user_id));
            }
            Ok(c
                .insert_comment(post_id, user_id, content, Timestamp::now())
                .clone())
        })?;
        tracing::info!(comment = %comment.id, post = %post_id, author = %user_id, "comment created");
        Ok(comment)
    }

    fn list_comments(&self, post_id: PostId) -> StoreResult<Vec<Comment>> {
        self.read(|c| c.comments_on(post_id).cloned().collect())
    }
}

impl std::fmt::Debug for InMemoryEntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (users, posts, comments) = self
            .read(|c| (c.user_count(), c.post_count(), c.total_comments()))
            .unwrap_or_default();
        f.debug_struct("InMemoryEntityStore")
            .field("users", &users)
            .field("posts", &posts)
            .field("comments", &comments)
            .finish()
    }
}
