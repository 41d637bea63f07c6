use agora_store::{Collections, InMemoryEntityStore, SocialGraph, StoreError, StoreResult};
use agora_types::{PostId, UserId};

use crate::view::{CommentView, PostView, UserSummary, UserView};

/// Order feed entries newest first. Equal timestamps keep their input order.
pub fn sort_feed(entries: &mut [PostView]) {
    entries.sort_by(|a, b| b.post.timestamp.cmp(&a.post.timestamp));
}

/// Order a comment thread oldest first. Equal timestamps keep their input
/// order.
pub fn sort_comments(entries: &mut [CommentView]) {
    entries.sort_by(|a, b| a.comment.timestamp.cmp(&b.comment.timestamp));
}

/// Join every post with its author and comment count, newest first.
///
/// Posts whose author no longer resolves are left out.
pub fn project_feed(c: &Collections) -> Vec<PostView> {
    let mut entries: Vec<PostView> = c
        .posts()
        .filter_map(|post| match c.user(post.user_id) {
            Some(author) => Some(PostView::new(post, author, c.comment_count(post.id))),
            None => {
                tracing::warn!(post = %post.id, author = %post.user_id, "dropping post with unknown author");
                None
            }
        })
        .collect();
    sort_feed(&mut entries);
    entries
}

/// Join each comment on `post` with its author, oldest first.
pub fn project_comments(c: &Collections, post: PostId) -> StoreResult<Vec<CommentView>> {
    if c.post(post).is_none() {
        return Err(StoreError::PostNotFound(post));
    }
    let mut entries: Vec<CommentView> = c
        .comments_on(post)
        .filter_map(|comment| {
            c.user(comment.user_id)
                .map(|author| CommentView::new(comment, author))
        })
        .collect();
    sort_comments(&mut entries);
    Ok(entries)
}

/// Read-side joins over an entity store.
#[derive(Clone, Copy, Debug)]
pub struct FeedAssembler<'a> {
    store: &'a InMemoryEntityStore,
}

impl<'a> FeedAssembler<'a> {
    pub fn new(store: &'a InMemoryEntityStore) -> Self {
        Self { store }
    }

    /// The global feed, newest first.
    pub fn assemble_feed(&self) -> StoreResult<Vec<PostView>> {
        let feed = self.store.read(project_feed)?;
        tracing::debug!(entries = feed.len(), "feed assembled");
        Ok(feed)
    }

    /// The comment thread of `post`, oldest first.
    pub fn assemble_comments(&self, post: PostId) -> StoreResult<Vec<CommentView>> {
        self.store.read(|c| project_comments(c, post))?
    }

    pub fn user_view(&self, user: UserId) -> StoreResult<UserView> {
        self.store
            .read(|c| c.user(user).map(UserView::from))?
            .ok_or(StoreError::UserNotFound(user))
    }

    pub fn list_user_views(&self) -> StoreResult<Vec<UserView>> {
        self.store.read(|c| c.users().map(UserView::from).collect())
    }

    pub fn followers(&self, user: UserId) -> StoreResult<Vec<UserSummary>> {
        let users = SocialGraph::new(self.store).list_followers(user)?;
        Ok(users.iter().map(UserSummary::from).collect())
    }

    pub fn following(&self, user: UserId) -> StoreResult<Vec<UserSummary>> {
        let users = SocialGraph::new(self.store).list_following(user)?;
        Ok(users.iter().map(UserSummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_store::{Engagement, EntityStore};
    use agora_types::{NewPost, Post, Timestamp, User, UserFields};
    use proptest::prelude::*;

    fn author() -> User {
        User::new(UserId::new(1), UserFields::new("a", "a@x").validate().unwrap())
    }

    fn post_at(id: u64, ms: i64) -> PostView {
        let draft = NewPost::text(UserId::new(1), format!("post {id}"))
            .validate()
            .unwrap();
        PostView::new(
            &Post::new(PostId::new(id), draft, Timestamp::from_millis(ms)),
            &author(),
            0,
        )
    }

    fn ids(entries: &[PostView]) -> Vec<u64> {
        entries.iter().map(|e| e.post.id.get()).collect()
    }

    fn populated() -> (InMemoryEntityStore, UserId, UserId) {
        let store = InMemoryEntityStore::new();
        let a = store
            .create_user(UserFields::new("a", "a@x").validate().unwrap())
            .unwrap()
            .id;
        let b = store
            .create_user(UserFields::new("b", "b@x").with_bio("hello").validate().unwrap())
            .unwrap()
            .id;
        (store, a, b)
    }

    // -----------------------------------------------------------------------
    // Ordering
    // -----------------------------------------------------------------------

    #[test]
    fn feed_is_newest_first() {
        let mut entries = vec![post_at(1, 100), post_at(2, 300), post_at(3, 200)];
        sort_feed(&mut entries);
        assert_eq!(ids(&entries), vec![2, 3, 1]);
    }

    #[test]
    fn feed_ties_keep_storage_order() {
        let mut entries = vec![post_at(1, 100), post_at(2, 100), post_at(3, 50)];
        sort_feed(&mut entries);
        assert_eq!(ids(&entries), vec![1, 2, 3]);
    }

    proptest! {
        #[test]
        fn feed_order_is_non_increasing(times in proptest::collection::vec(0i64..20, 0..24)) {
            let mut entries: Vec<_> = times
                .iter()
                .enumerate()
                .map(|(i, ms)| post_at(i as u64 + 1, *ms))
                .collect();
            sort_feed(&mut entries);
            for pair in entries.windows(2) {
                prop_assert!(pair[0].post.timestamp >= pair[1].post.timestamp);
                if pair[0].post.timestamp == pair[1].post.timestamp {
                    prop_assert!(pair[0].post.id < pair[1].post.id);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Joins
    // -----------------------------------------------------------------------

    #[test]
    fn feed_joins_author_and_comment_count() {
        let (store, a, b) = populated();
        let post = store
            .create_post(NewPost::text(b, "hi").validate().unwrap())
            .unwrap();
        let engagement = Engagement::new(&store);
        for text in ["one", "two", "three"] {
            engagement.add_comment(post.id, a, text).unwrap();
        }

        let feed = FeedAssembler::new(&store).assemble_feed().unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].user.id, b);
        assert_eq!(feed[0].user.bio.as_deref(), Some("hello"));
        assert_eq!(feed[0].comments_count, 3);
    }

    #[test]
    fn feed_from_store_is_time_ordered() {
        let (store, a, _) = populated();
        for text in ["first", "second", "third"] {
            store
                .create_post(NewPost::text(a, text).validate().unwrap())
                .unwrap();
        }
        let feed = FeedAssembler::new(&store).assemble_feed().unwrap();
        assert_eq!(feed.len(), 3);
        for pair in feed.windows(2) {
            assert!(pair[0].post.timestamp >= pair[1].post.timestamp);
        }
    }

    #[test]
    fn assembling_does_not_mutate() {
        let (store, a, _) = populated();
        store
            .create_post(NewPost::text(a, "x").validate().unwrap())
            .unwrap();
        let before = store.list_posts().unwrap();
        FeedAssembler::new(&store).assemble_feed().unwrap();
        assert_eq!(store.list_posts().unwrap(), before);
    }

    #[test]
    fn comments_are_oldest_first_with_authors() {
        let (store, a, b) = populated();
        let post = store
            .create_post(NewPost::text(a, "hi").validate().unwrap())
            .unwrap();
        let engagement = Engagement::new(&store);
        engagement.add_comment(post.id, b, "first").unwrap();
        engagement.add_comment(post.id, a, "second").unwrap();

        let thread = FeedAssembler::new(&store).assemble_comments(post.id).unwrap();
        let texts: Vec<_> = thread.iter().map(|c| c.comment.content.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(thread[0].user.id, b);
        assert_eq!(thread[1].user.username, "a");
    }

    #[test]
    fn comments_for_unknown_post_are_not_found() {
        let (store, _, _) = populated();
        let err = FeedAssembler::new(&store)
            .assemble_comments(PostId::new(8))
            .unwrap_err();
        assert!(matches!(err, StoreError::PostNotFound(_)));
    }

    // -----------------------------------------------------------------------
    // User views
    // -----------------------------------------------------------------------

    #[test]
    fn user_views_report_counts() {
        let (store, a, b) = populated();
        SocialGraph::new(&store).toggle_follow(a, b).unwrap();
        let assembler = FeedAssembler::new(&store);

        let view = assembler.user_view(b).unwrap();
        assert_eq!(view.followers_count, 1);
        assert_eq!(view.following_count, 0);

        let all = assembler.list_user_views().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].following_count, 1);

        assert!(assembler.user_view(UserId::new(50)).unwrap_err().is_not_found());
    }

    #[test]
    fn follower_summaries() {
        let (store, a, b) = populated();
        SocialGraph::new(&store).toggle_follow(a, b).unwrap();
        let assembler = FeedAssembler::new(&store);
        let followers = assembler.followers(b).unwrap();
        assert_eq!(followers, vec![UserSummary::from(&store.get_user(a).unwrap())]);
        assert!(assembler.following(b).unwrap().is_empty());
    }

    #[test]
    fn seeded_feed_keeps_storage_order_on_equal_timestamps() {
        let store = agora_store::seed::sample_store().unwrap();
        let feed = FeedAssembler::new(&store).assemble_feed().unwrap();
        assert_eq!(ids(&feed), vec![1, 2, 3]);
        assert!(feed.iter().all(|entry| entry.comments_count == 0));
    }
}
