//! Foundation types for Agora.
//!
//! This crate provides the identifiers, timestamps, entity records and input
//! records shared by every other Agora crate. It performs no I/O and owns no
//! state.
//!
//! # Key Types
//!
//! - [`UserId`], [`PostId`], [`CommentId`] -- per-collection integer identifiers
//! - [`Timestamp`] -- UTC creation time used for feed and comment ordering
//! - [`User`], [`Post`], [`Comment`] -- canonical stored entities
//! - [`UserFields`], [`NewPost`], [`NewComment`] -- validated creation input
//! - [`MediaKind`] -- the media type tag paired with a post's media URL

pub mod entity;
pub mod error;
pub mod id;
pub mod input;
pub mod media;
pub mod temporal;

pub use entity::{Comment, Post, User};
pub use error::ValidationError;
pub use id::{CommentId, PostId, UserId};
pub use input::{
    comment_content, Media, NewComment, NewPost, PostDraft, UserFields, UserProfile, MAX_POST_CHARS,
};
pub use media::MediaKind;
pub use temporal::Timestamp;
