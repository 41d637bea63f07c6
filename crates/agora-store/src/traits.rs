use agora_types::{Comment, Post, PostDraft, PostId, User, UserId, UserProfile};

use crate::error::StoreResult;

/// Canonical storage for users, posts and comments.
///
/// All implementations must satisfy these invariants:
/// - Identifiers are per-collection integers starting at 1, assigned as
///   `max(existing) + 1` at creation time and never reused.
/// - Creation is unconditional once given validated input, apart from
///   referential checks on the ids it names.
/// - Listings are returned in creation (id) order.
/// - Entities are returned by value; callers never hold references into
///   the store across calls.
pub trait EntityStore: Send + Sync {
    /// Create a user with empty follow sets.
    fn create_user(&self, profile: UserProfile) -> StoreResult<User>;

    /// Look up a user, or `UserNotFound`.
    fn get_user(&self, id: UserId) -> StoreResult<User>;

    /// All users in creation order.
    fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Replace a user's profile fields, keeping id and follow edges.
    fn update_user(&self, id: UserId, profile: UserProfile) -> StoreResult<User>;

    /// Create a post. The author must exist.
    fn create_post(&self, draft: PostDraft) -> StoreResult<Post>;

    /// Look up a post, or `PostNotFound`.
    fn get_post(&self, id: PostId) -> StoreResult<Post>;

    /// All posts in creation order.
    fn list_posts(&self) -> StoreResult<Vec<Post>>;

    /// Create a comment. Both the post and the author must exist.
    fn create_comment(
        &self,
        post_id: PostId,
        user_id: UserId,
        content: String,
    ) -> StoreResult<Comment>;

    /// Comments on a post in creation order. Unknown posts have none.
    fn list_comments(&self, post_id: PostId) -> StoreResult<Vec<Comment>>;
}
