use std::collections::BTreeSet;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::id::{CommentId, PostId, UserId};
use crate::input::{Media, PostDraft, UserProfile};
use crate::temporal::Timestamp;

/// A registered user and both sides of their follow edges.
///
/// `followers` and `following` are kept mutually consistent across users by
/// the store's social graph; a user never appears in its own sets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub followers: BTreeSet<UserId>,
    pub following: BTreeSet<UserId>,
}

impl User {
    /// A fresh user with no follow edges.
    pub fn new(id: UserId, profile: UserProfile) -> Self {
        Self {
            id,
            username: profile.username,
            email: profile.email,
            bio: profile.bio,
            profile_image_url: profile.profile_image_url,
            followers: BTreeSet::new(),
            following: BTreeSet::new(),
        }
    }

    /// Replace the profile fields, keeping id and follow edges.
    pub fn apply_profile(&mut self, profile: UserProfile) {
        self.username = profile.username;
        self.email = profile.email;
        self.bio = profile.bio;
        self.profile_image_url = profile.profile_image_url;
    }

    pub fn follows(&self, other: UserId) -> bool {
        self.following.contains(&other)
    }

    pub fn is_followed_by(&self, other: UserId) -> bool {
        self.followers.contains(&other)
    }

    pub fn followers_count(&self) -> usize {
        self.followers.len()
    }

    pub fn following_count(&self) -> usize {
        self.following.len()
    }
}

/// A post with optional text and optional media; at least one is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub content: Option<String>,
    pub media: Option<Media>,
    /// Ids of users who like the post. Ids are not required to resolve.
    pub likes: BTreeSet<UserId>,
    pub timestamp: Timestamp,
}

impl Post {
    pub fn new(id: PostId, draft: PostDraft, timestamp: Timestamp) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            content: draft.content,
            media: draft.media,
            likes: BTreeSet::new(),
            timestamp,
        }
    }

    pub fn is_liked_by(&self, user: UserId) -> bool {
        self.likes.contains(&user)
    }

    pub fn likes_count(&self) -> usize {
        self.likes.len()
    }
}

// The wire form flattens `media` into the `mediaUrl`/`mediaType` pair the
// browser client reads, both null when there is no media.
impl Serialize for Post {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Post", 7)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("userId", &self.user_id)?;
        s.serialize_field("content", &self.content)?;
        s.serialize_field("mediaUrl", &self.media.as_ref().map(|m| m.url.as_str()))?;
        s.serialize_field("mediaType", &self.media.as_ref().map(|m| m.kind))?;
        s.serialize_field("likes", &self.likes)?;
        s.serialize_field("timestamp", &self.timestamp)?;
        s.end()
    }
}

/// A comment on a post. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub timestamp: Timestamp,
}
