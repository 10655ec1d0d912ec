//! Network module: the registry of users.
//!
//! A `Network` is an explicitly constructed value owned by its caller, one
//! per session. It maps identities to users and routes friendship changes so
//! both sides of an edge are always updated together.

use std::collections::HashMap;

use crate::error::{Result, SocialError};
use crate::feed::{Feed, FeedAggregator};
use crate::user::User;

#[derive(Debug, Default)]
pub struct Network {
    users: HashMap<String, User>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user, replacing any account with the same identity.
    ///
    /// The replaced account is first unlinked from all of its friends so no
    /// one keeps a one-sided edge to the new account. Returns the replaced
    /// account, if any. Use [`Network::register`] to refuse duplicates.
    ///
    /// Friendships the incoming user already carries are kept only for
    /// registered friends, who are linked back; see [`Network::register`].
    pub fn add_user(&mut self, user: User) -> Option<User> {
        let previous_friends = self
            .users
            .get(user.identity())
            .map(|previous| previous.friends().to_vec())
            .unwrap_or_default();
        for friend in &previous_friends {
            if let Some(friend) = self.users.get_mut(friend) {
                friend.unlink(user.identity());
            }
        }

        let user = self.admit(user);
        self.users.insert(user.identity().to_string(), user)
    }

    /// Insert a user whose identity is not registered yet.
    ///
    /// A user befriended before joining keeps only the friends that are
    /// registered here, and each of them gets the edge back. Edges to unknown
    /// identities are dropped.
    pub fn register(&mut self, user: User) -> Result<()> {
        if self.contains(user.identity()) {
            return Err(SocialError::DuplicateIdentity(user.identity().to_string()));
        }
        let user = self.admit(user);
        self.users.insert(user.identity().to_string(), user);
        Ok(())
    }

    pub fn get_user(&self, identity: &str) -> Option<&User> {
        self.users.get(identity)
    }

    pub fn get_user_mut(&mut self, identity: &str) -> Option<&mut User> {
        self.users.get_mut(identity)
    }

    /// Like [`Network::get_user`], but absence is an error.
    pub fn require_user(&self, identity: &str) -> Result<&User> {
        self.get_user(identity)
            .ok_or_else(|| SocialError::user_not_found(identity))
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.users.contains_key(identity)
    }

    /// Registered identities, sorted.
    pub fn identities(&self) -> Vec<&str> {
        let mut identities: Vec<&str> = self.users.keys().map(String::as_str).collect();
        identities.sort_unstable();
        identities
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// False for an unknown identity, otherwise an exact credential match.
    pub fn authenticate(&self, identity: &str, credential: &str) -> bool {
        self.get_user(identity)
            .map(|user| user.authenticate_with(credential))
            .unwrap_or(false)
    }

    /// Make two registered users friends of each other.
    pub fn add_friend(&mut self, identity: &str, friend: &str) -> Result<()> {
        self.check_pair(identity, friend)?;
        if let Some(user) = self.users.get_mut(identity) {
            user.link(friend);
        }
        if let Some(user) = self.users.get_mut(friend) {
            user.link(identity);
        }
        Ok(())
    }

    /// End a friendship on both sides. A no-op when they are not friends.
    pub fn remove_friend(&mut self, identity: &str, friend: &str) -> Result<()> {
        self.check_pair(identity, friend)?;
        if let Some(user) = self.users.get_mut(identity) {
            user.unlink(friend);
        }
        if let Some(user) = self.users.get_mut(friend) {
            user.unlink(identity);
        }
        Ok(())
    }

    /// The ranked activity feed of `identity`'s friends.
    pub fn activity_feed(&self, identity: &str) -> Result<Feed<'_>> {
        let user = self.require_user(identity)?;
        Ok(FeedAggregator::new(self).feed(user))
    }

    // Rebuild the friend list of an incoming user against the registry so
    // every kept edge exists on both sides.
    fn admit(&mut self, mut user: User) -> User {
        for friend in user.take_friends() {
            if friend == user.identity() {
                continue;
            }
            if let Some(other) = self.users.get_mut(&friend) {
                other.link(user.identity());
                user.link(&friend);
            }
        }
        user
    }

    fn check_pair(&self, identity: &str, friend: &str) -> Result<()> {
        self.require_user(identity)?;
        self.require_user(friend)?;
        if identity == friend {
            return Err(SocialError::self_friendship(identity));
        }
        Ok(())
    }
}
