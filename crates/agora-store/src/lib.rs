//! In-memory entity store for Agora.
//!
//! The store owns the three canonical collections (users, posts, comments)
//! and is the only place they are mutated. Everything above it works from
//! borrowed, read-only views.
//!
//! # Components
//!
//! - [`InMemoryEntityStore`] -- one lock over all three collections
//! - [`SocialGraph`] -- follow/unfollow as a single two-sided toggle
//! - [`Engagement`] -- like toggling and comment creation
//! - [`seed`] -- the fixed sample data loaded at process start
//!
//! # Design Rules
//!
//! 1. Identifiers are `max(existing) + 1`, recomputed at every creation.
//! 2. Every mutation validates before it writes; a failed call changes nothing.
//! 3. A follow edge is always written on both users under one write lock.
//! 4. Storage is permissive about stale ids; read views filter them.
//! 5. Multi-entity reads take the read lock once for the whole join.

pub mod collections;
pub mod engagement;
pub mod error;
pub mod graph;
pub mod memory;
pub mod seed;
pub mod traits;

pub use collections::Collections;
pub use engagement::{Engagement, LikeOutcome};
pub use error::{StoreError, StoreResult};
pub use graph::{FollowOutcome, SocialGraph};
pub use memory::InMemoryEntityStore;
pub use traits::EntityStore;
