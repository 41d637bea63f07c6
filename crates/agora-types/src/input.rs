//! Creation and update input records.
//!
//! Each record comes in two forms: a permissive, deserializable request form
//! whose fields are all optional, and the validated form produced by its
//! `validate()` method. The store only ever accepts validated forms.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::UserId;
use crate::media::MediaKind;

/// Maximum length of a post's text content, in characters.
pub const MAX_POST_CHARS: usize = 280;

/// Trim a string and collapse empty results to `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Request body for creating or replacing a user's profile fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, alias = "profileImageRef")]
    pub profile_image_url: Option<String>,
}

/// Validated profile fields: username and email are present and non-blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
}

impl UserFields {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_profile_image(mut self, url: impl Into<String>) -> Self {
        self.profile_image_url = Some(url.into());
        self
    }

    pub fn validate(self) -> Result<UserProfile, ValidationError> {
        let username = non_blank(self.username).ok_or(ValidationError::MissingField("username"))?;
        let email = non_blank(self.email).ok_or(ValidationError::MissingField("email"))?;
        Ok(UserProfile {
            username,
            email,
            bio: non_blank(self.bio),
            profile_image_url: non_blank(self.profile_image_url),
        })
    }
}

/// Request body for creating a post.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// A media URL with its kind. Exists only as a pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Media {
    pub url: String,
    pub kind: MediaKind,
}

/// Validated post input: at least one of content and media is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostDraft {
    pub user_id: UserId,
    pub content: Option<String>,
    pub media: Option<Media>,
}

impl NewPost {
    pub fn text(user_id: UserId, content: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_media(mut self, url: impl Into<String>, kind: Option<MediaKind>) -> Self {
        self.media_url = Some(url.into());
        self.media_type = kind.map(|k| k.to_string());
        self
    }

    pub fn validate(self) -> Result<PostDraft, ValidationError> {
        let user_id = self.user_id.ok_or(ValidationError::MissingField("userId"))?;
        let content = non_blank(self.content);
        let media_url = non_blank(self.media_url);

        if content.is_none() && media_url.is_none() {
            return Err(ValidationError::EmptyPost);
        }
        if let Some(text) = &content {
            let chars = text.chars().count();
            if chars > MAX_POST_CHARS {
                return Err(ValidationError::ContentTooLong {
                    max: MAX_POST_CHARS,
                    actual: chars,
                });
            }
        }

        // The kind tag is ignored without a URL; a URL without a kind
        // gets one inferred from its extension.
        let media = match media_url {
            Some(url) => {
                let kind = match non_blank(self.media_type) {
                    Some(tag) => tag.parse::<MediaKind>()?,
                    None => MediaKind::infer_from_url(&url),
                };
                Some(Media { url, kind })
            }
            None => None,
        };

        Ok(PostDraft {
            user_id,
            content,
            media,
        })
    }
}

/// Request body for commenting on a post.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NewComment {
    pub fn new(user_id: UserId, content: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            content: Some(content.into()),
        }
    }

    /// Returns the author and the trimmed comment text.
    pub fn validate(self) -> Result<(UserId, String), ValidationError> {
        let user_id = self.user_id.ok_or(ValidationError::MissingField("userId"))?;
        let content = comment_content(self.content.as_deref().unwrap_or_default())?;
        Ok((user_id, content))
    }
}

/// Trim comment text, rejecting whitespace-only input.
pub fn comment_content(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyComment)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_fields_require_username_and_email() {
        let err = UserFields {
            email: Some("a@x".into()),
            ..UserFields::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("username"));

        let err = UserFields {
            username: Some("a".into()),
            email: Some("   ".into()),
            ..UserFields::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("email"));
    }

    #[test]
    fn user_fields_blank_optionals_become_none() {
        let profile = UserFields::new(" a ", "a@x")
            .with_bio("")
            .with_profile_image("  ")
            .validate()
            .unwrap();
        assert_eq!(profile.username, "a");
        assert!(profile.bio.is_none());
        assert!(profile.profile_image_url.is_none());
    }

    #[test]
    fn user_fields_accept_profile_image_ref_alias() {
        let fields: UserFields = serde_json::from_str(
            r#"{"username":"a","email":"a@x","profileImageRef":"https://x/a.png"}"#,
        )
        .unwrap();
        assert_eq!(fields.profile_image_url.as_deref(), Some("https://x/a.png"));
    }

    #[test]
    fn post_requires_content_or_media() {
        let err = NewPost {
            user_id: Some(UserId::new(1)),
            content: Some("   ".into()),
            ..NewPost::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::EmptyPost);
    }

    #[test]
    fn post_requires_user_id() {
        let err = NewPost {
            content: Some("hi".into()),
            ..NewPost::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("userId"));
    }

    #[test]
    fn post_content_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_POST_CHARS);
        assert!(NewPost::text(UserId::new(1), at_limit).validate().is_ok());

        let over = "a".repeat(MAX_POST_CHARS + 1);
        let err = NewPost::text(UserId::new(1), over).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::ContentTooLong {
                max: MAX_POST_CHARS,
                actual: MAX_POST_CHARS + 1
            }
        );
    }

    #[test]
    fn media_only_post_is_valid() {
        let draft = NewPost {
            user_id: Some(UserId::new(2)),
            media_url: Some("https://x/clip.mp4".into()),
            ..NewPost::default()
        }
        .validate()
        .unwrap();
        assert!(draft.content.is_none());
        assert_eq!(draft.media.unwrap().kind, MediaKind::Video);
    }

    #[test]
    fn media_type_without_url_is_dropped() {
        let draft = NewPost {
            user_id: Some(UserId::new(2)),
            content: Some("hi".into()),
            media_type: Some("video".into()),
            ..NewPost::default()
        }
        .validate()
        .unwrap();
        assert!(draft.media.is_none());
    }

    #[test]
    fn explicit_media_type_wins_over_inference() {
        let draft = NewPost::text(UserId::new(1), "look")
            .with_media("https://x/thing.mp4", Some(MediaKind::Image))
            .validate()
            .unwrap();
        assert_eq!(draft.media.unwrap().kind, MediaKind::Image);
    }

    #[test]
    fn unknown_media_type_is_rejected() {
        let err = NewPost {
            user_id: Some(UserId::new(1)),
            media_url: Some("https://x/a.wav".into()),
            media_type: Some("audio".into()),
            ..NewPost::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownMediaKind(_)));
    }

    #[test]
    fn post_body_from_client_json() {
        let body: NewPost = serde_json::from_str(
            r#"{"userId":"1","content":"hi","mediaUrl":"","mediaType":null}"#,
        )
        .unwrap();
        let draft = body.validate().unwrap();
        assert_eq!(draft.user_id, UserId::new(1));
        assert_eq!(draft.content.as_deref(), Some("hi"));
        assert!(draft.media.is_none());
    }

    #[test]
    fn comment_content_is_trimmed() {
        let (user, content) = NewComment::new(UserId::new(3), "  nice  ").validate().unwrap();
        assert_eq!(user, UserId::new(3));
        assert_eq!(content, "nice");
    }

    #[test]
    fn blank_comment_is_rejected() {
        assert_eq!(comment_content(" \n\t"), Err(ValidationError::EmptyComment));
        let err = NewComment {
            user_id: Some(UserId::new(1)),
            content: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::EmptyComment);
    }
}
