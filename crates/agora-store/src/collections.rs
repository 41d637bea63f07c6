use std::collections::BTreeMap;

use agora_types::{
    Comment, CommentId, Post, PostDraft, PostId, Timestamp, User, UserId, UserProfile,
};

/// The three canonical collections, keyed by id.
///
/// Iteration follows id order, which is also creation order. Read accessors
/// are public so joins can borrow a consistent view; all mutation is
/// crate-private and goes through the store, the social graph, or the
/// engagement manager.
#[derive(Clone, Debug, Default)]
pub struct Collections {
    users: BTreeMap<UserId, User>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
}

impl Collections {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.values()
    }

    /// Comments on `post`, in storage order.
    pub fn comments_on(&self, post: PostId) -> impl Iterator<Item = &Comment> {
        self.comments.values().filter(move |c| c.post_id == post)
    }

    pub fn comment_count(&self, post: PostId) -> usize {
        self.comments_on(post).count()
    }

    /// Resolve ids to users, silently skipping ids with no user.
    pub fn resolve_users<'a, I>(&'a self, ids: I) -> impl Iterator<Item = &'a User> + 'a
    where
        I: IntoIterator<Item = &'a UserId>,
        I::IntoIter: 'a,
    {
        ids.into_iter().filter_map(move |id| self.users.get(id))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn total_comments(&self) -> usize {
        self.comments.len()
    }

    // -----------------------------------------------------------------------
    // Identifier assignment
    // -----------------------------------------------------------------------

    pub(crate) fn next_user_id(&self) -> UserId {
        self.users
            .keys()
            .next_back()
            .map_or(UserId::FIRST, |id| id.next())
    }

    pub(crate) fn next_post_id(&self) -> PostId {
        self.posts
            .keys()
            .next_back()
            .map_or(PostId::FIRST, |id| id.next())
    }

    pub(crate) fn next_comment_id(&self) -> CommentId {
        self.comments
            .keys()
            .next_back()
            .map_or(CommentId::FIRST, |id| id.next())
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub(crate) fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    pub(crate) fn post_mut(&mut self, id: PostId) -> Option<&mut Post> {
        self.posts.get_mut(&id)
    }

    /// Insert a new user under the next id.
    ///
    /// Existing edges that already name the new id become live here, so the
    /// new user receives the reverse side of each of them.
    pub(crate) fn insert_user(&mut self, profile: UserProfile) -> &User {
        let id = self.next_user_id();
        let mut user = User::new(id, profile);
        for other in self.users.values() {
            if other.following.contains(&id) {
                user.followers.insert(other.id);
            }
            if other.followers.contains(&id) {
                user.following.insert(other.id);
            }
        }
        if !user.followers.is_empty() || !user.following.is_empty() {
            tracing::debug!(
                user = %id,
                followers = user.followers.len(),
                following = user.following.len(),
                "adopted existing edges"
            );
        }
        self.users.entry(id).or_insert(user)
    }

    pub(crate) fn insert_post(&mut self, draft: PostDraft, timestamp: Timestamp) -> &Post {
        let id = self.next_post_id();
        self.posts
            .entry(id)
            .or_insert(Post::new(id, draft, timestamp))
    }

    pub(crate) fn insert_comment(
        &mut self,
        post_id: PostId,
        user_id: UserId,
        content: String,
        timestamp: Timestamp,
    ) -> &Comment {
        let id = self.next_comment_id();
        self.comments.entry(id).or_insert(Comment {
            id,
            post_id,
            user_id,
            content,
            timestamp,
        })
    }

    /// Insert a fully formed user, edges included. Seed data only.
    pub(crate) fn restore_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Insert a fully formed post, likes included. Seed data only.
    pub(crate) fn restore_post(&mut self, post: Post) {
        self.posts.insert(post.id, post);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::{NewPost, UserFields};

    fn profile(name: &str) -> UserProfile {
        UserFields::new(name, format!("{name}@x")).validate().unwrap()
    }

    #[test]
    fn ids_start_at_one() {
        let c = Collections::new();
        assert_eq!(c.next_user_id(), UserId::new(1));
        assert_eq!(c.next_post_id(), PostId::new(1));
        assert_eq!(c.next_comment_id(), CommentId::new(1));
    }

    #[test]
    fn ids_follow_the_maximum() {
        let mut c = Collections::new();
        let mut user = User::new(UserId::new(10), profile("a"));
        user.followers.insert(UserId::new(99));
        c.restore_user(user);
        assert_eq!(c.insert_user(profile("b")).id, UserId::new(11));
    }

    #[test]
    fn new_user_adopts_edges_naming_its_id() {
        let mut c = Collections::new();
        let mut user = User::new(UserId::new(1), profile("a"));
        user.following.insert(UserId::new(3));
        user.followers.insert(UserId::new(2));
        c.restore_user(user);

        let second = c.insert_user(profile("b")).clone();
        assert_eq!(second.id, UserId::new(2));
        assert!(second.follows(UserId::new(1)));
        assert_eq!(second.followers_count(), 0);

        let third = c.insert_user(profile("c")).clone();
        assert!(third.is_followed_by(UserId::new(1)));
        assert_eq!(third.following_count(), 0);
    }

    #[test]
    fn comments_on_filters_by_post() {
        let mut c = Collections::new();
        let author = c.insert_user(profile("a")).id;
        let p1 = c
            .insert_post(NewPost::text(author, "one").validate().unwrap(), Timestamp::now())
            .id;
        let p2 = c
            .insert_post(NewPost::text(author, "two").validate().unwrap(), Timestamp::now())
            .id;
        c.insert_comment(p1, author, "x".into(), Timestamp::now());
        c.insert_comment(p2, author, "y".into(), Timestamp::now());
        c.insert_comment(p1, author, "z".into(), Timestamp::now());

        let on_p1: Vec<_> = c.comments_on(p1).map(|c| c.content.as_str()).collect();
        assert_eq!(on_p1, vec!["x", "z"]);
        assert_eq!(c.comment_count(p2), 1);
        assert_eq!(c.total_comments(), 3);
    }

    #[test]
    fn resolve_users_skips_stale_ids() {
        let mut c = Collections::new();
        let a = c.insert_user(profile("a")).id;
        let ids = [a, UserId::new(900)];
        let resolved: Vec<_> = c.resolve_users(ids.iter()).map(|u| u.id).collect();
        assert_eq!(resolved, vec![a]);
    }
}
