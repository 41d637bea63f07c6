//! Wire views: what read endpoints expose instead of raw entities.
//!
//! Follower and following sets are reduced to counts, and joined authors
//! are reduced to summaries. All conversions are pure.

use serde::Serialize;

use agora_types::{Comment, Post, User, UserId};

/// A user with follow counts instead of id sets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub followers_count: usize,
    pub following_count: usize,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            profile_image_url: user.profile_image_url.clone(),
            followers_count: user.followers_count(),
            following_count: user.following_count(),
        }
    }
}

/// Minimal user reference used in follower lists and comment threads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub profile_image_url: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            profile_image_url: user.profile_image_url.clone(),
        }
    }
}

/// Post author as embedded in the feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: UserId,
    pub username: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
}

impl From<&User> for AuthorView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            bio: user.bio.clone(),
            profile_image_url: user.profile_image_url.clone(),
        }
    }
}

/// A feed entry: the post's own fields plus `user` and `commentsCount`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub user: AuthorView,
    pub comments_count: usize,
}

impl PostView {
    pub fn new(post: &Post, author: &User, comments_count: usize) -> Self {
        Self {
            post: post.clone(),
            user: AuthorView::from(author),
            comments_count,
        }
    }
}

/// A comment's own fields plus its author summary under `user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: UserSummary,
}

impl CommentView {
    pub fn new(comment: &Comment, author: &User) -> Self {
        Self {
            comment: comment.clone(),
            user: UserSummary::from(author),
        }
    }
}
