//! The directed follow graph.
//!
//! A follow edge `A -> B` is stored twice: `B` in `A.following` and `A` in
//! `B.followers`. [`SocialGraph::toggle_follow`] is the only operation that
//! writes either side, and it always writes both under the store's write
//! lock, so the two sets can never disagree.

use serde::Serialize;

use agora_types::{User, UserId};

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryEntityStore;

/// State of the relation after a follow toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowOutcome {
    /// Whether the actor now follows the target.
    pub is_following: bool,
    /// Size of the target's follower set after the toggle.
    pub followers_count: usize,
    /// Size of the actor's following set after the toggle.
    pub following_count: usize,
}

/// Follow-graph operations over an entity store.
#[derive(Clone, Copy, Debug)]
pub struct SocialGraph<'a> {
    store: &'a InMemoryEntityStore,
}

impl<'a> SocialGraph<'a> {
    pub fn new(store: &'a InMemoryEntityStore) -> Self {
        Self { store }
    }

    /// Follow `target` if `actor` does not follow it yet, unfollow otherwise.
    ///
    /// Fails with `UserNotFound` if either user is missing and with
    /// `SelfFollowRejected` if they are the same user; neither failure
    /// changes any state.
    pub fn toggle_follow(&self, actor: UserId, target: UserId) -> StoreResult<FollowOutcome> {
        let outcome = self.store.write(|c| {
            if c.user(target).is_none() {
                return Err(StoreError::UserNotFound(target));
            }
            let currently_following = c
                .user(actor)
                .ok_or(StoreError::UserNotFound(actor))?
                .follows(target);
            if actor == target {
                return Err(StoreError::SelfFollowRejected(actor));
            }

            // Both users exist and differ; from here on both sides are
            // written before the lock is released.
            let following_count = {
                let actor_user = c.user_mut(actor).ok_or(StoreError::UserNotFound(actor))?;
                if currently_following {
                    actor_user.following.remove(&target);
                } else {
                    actor_user.following.insert(target);
                }
                actor_user.following_count()
            };
            let followers_count = {
                let target_user = c.user_mut(target).ok_or(StoreError::UserNotFound(target))?;
                if currently_following {
                    target_user.followers.remove(&actor);
                } else {
                    target_user.followers.insert(actor);
                }
                target_user.followers_count()
            };

            Ok(FollowOutcome {
                is_following: !currently_following,
                followers_count,
                following_count,
            })
        })?;

        tracing::info!(
            actor = %actor,
            target = %target,
            following = outcome.is_following,
            "follow toggled"
        );
        Ok(outcome)
    }

    /// Users following `user`, in id order. Stale follower ids are skipped.
    pub fn list_followers(&self, user: UserId) -> StoreResult<Vec<User>> {
        self.store.read(|c| -> StoreResult<Vec<User>> {
            let subject = c.user(user).ok_or(StoreError::UserNotFound(user))?;
            Ok(c.resolve_users(subject.followers.iter()).cloned().collect())
        })?
    }

    /// Users `user` follows, in id order. Stale ids are skipped.
    pub fn list_following(&self, user: UserId) -> StoreResult<Vec<User>> {
        self.store.read(|c| -> StoreResult<Vec<User>> {
            let subject = c.user(user).ok_or(StoreError::UserNotFound(user))?;
            Ok(c.resolve_users(subject.following.iter()).cloned().collect())
        })?
    }

    /// Whether `actor` currently follows `target`.
    pub fn is_following(&self, actor: UserId, target: UserId) -> StoreResult<bool> {
        self.store.read(|c| {
            c.user(actor)
                .map(|u| u.follows(target))
                .ok_or(StoreError::UserNotFound(actor))
        })?
    }
}
