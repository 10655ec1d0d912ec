//! User module.
//!
//! A user owns its posts and knows its friends by identity. Friendship is
//! symmetric: every mutation updates both users in the same call, so there is
//! no public way to create a one-sided edge.

use crate::error::{Result, SocialError};
use crate::post::{Post, Postable};

/// A registered account.
#[derive(Clone)]
pub struct User {
    identity: String,
    email: String,
    credential: String,
    posts: Vec<Post>,
    // Insertion ordered; identities are unique within the list.
    friends: Vec<String>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("identity", &self.identity)
            .field("email", &self.email)
            .field("credential", &"<redacted>")
            .field("posts", &self.posts.len())
            .field("friends", &self.friends)
            .finish()
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identity)
    }
}

impl User {
    /// Create a user with no posts and no friends.
    ///
    /// Only emptiness of `identity` is checked here; uniqueness is the
    /// registry's business.
    pub fn new(
        identity: impl Into<String>,
        email: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self> {
        let identity = identity.into();
        if identity.is_empty() {
            return Err(SocialError::EmptyIdentity);
        }

        Ok(User {
            identity,
            email: email.into(),
            credential: credential.into(),
            posts: Vec::new(),
            friends: Vec::new(),
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = credential.into();
    }

    /// Exact match against the stored credential.
    pub fn authenticate_with(&self, credential: &str) -> bool {
        self.credential == credential
    }

    /// Append a post. Posts are kept in the order they were added.
    pub fn add_post(&mut self, post: Post) {
        self.posts.push(post);
    }

    /// Friend identities in the order the friendships were made.
    pub fn friends(&self) -> &[String] {
        &self.friends
    }

    pub fn is_friend(&self, identity: &str) -> bool {
        self.friends.iter().any(|friend| friend == identity)
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    /// Make `self` and `other` friends of each other.
    ///
    /// Adding an existing friend is a no-op. Fails with `SelfFriendship` when
    /// both sides carry the same identity, leaving both untouched.
    pub fn add_friend(&mut self, other: &mut User) -> Result<()> {
        if self.identity == other.identity {
            return Err(SocialError::self_friendship(&self.identity));
        }
        self.link(&other.identity);
        other.link(&self.identity);
        Ok(())
    }

    /// End the friendship between `self` and `other` on both sides.
    ///
    /// Removing someone who is not a friend is a no-op.
    pub fn remove_friend(&mut self, other: &mut User) -> Result<()> {
        if self.identity == other.identity {
            return Err(SocialError::self_friendship(&self.identity));
        }
        self.unlink(&other.identity);
        other.unlink(&self.identity);
        Ok(())
    }

    // One-sided edge updates. Callers must always pair them.
    pub(crate) fn link(&mut self, identity: &str) {
        if !self.is_friend(identity) {
            self.friends.push(identity.to_string());
        }
    }

    pub(crate) fn unlink(&mut self, identity: &str) {
        self.friends.retain(|friend| friend != identity);
    }

    pub(crate) fn take_friends(&mut self) -> Vec<String> {
        std::mem::take(&mut self.friends)
    }
}

impl Postable for User {
    fn posts(&self) -> &[Post] {
        &self.posts
    }
}
