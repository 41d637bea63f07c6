//! Read-side projections for Agora.
//!
//! Nothing in this crate mutates the store. [`FeedAssembler`] takes the
//! store's read lock once per request and joins posts, users and comments
//! into the reduced shapes defined in [`view`].

pub mod feed;
pub mod view;

pub use feed::{project_comments, project_feed, sort_comments, sort_feed, FeedAssembler};
pub use view::{AuthorView, CommentView, PostView, UserSummary, UserView};
