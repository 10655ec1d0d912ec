//! Post module.
//!
//! This module contains the immutable `Post` record and the `Postable`
//! capability shared by everything that owns a chronological list of posts.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset};

use crate::error::{Result, SocialError};
use crate::util::{self, Clock, SystemClock};

/// Maximum post length, in characters.
pub const MAX_POST_LENGTH: usize = 250;

/// How many posts a recent-posts view holds.
pub const RECENT_POSTS_LIMIT: usize = 3;

/// A piece of content published by a user.
///
/// Posts are immutable once created: there are accessors but no setters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    content: String,
    created_at: DateTime<FixedOffset>,
}

impl Post {
    /// Create a post stamped with the current time of `clock`.
    ///
    /// Fails with `ContentTooLong` when `content` has more than
    /// [`MAX_POST_LENGTH`] characters.
    pub fn create<C: Clock + ?Sized>(content: impl Into<String>, clock: &C) -> Result<Self> {
        let content = content.into();
        let length = content.chars().count();
        if length > MAX_POST_LENGTH {
            return Err(SocialError::ContentTooLong {
                length,
                max: MAX_POST_LENGTH,
            });
        }

        Ok(Post {
            content,
            created_at: clock.now(),
        })
    }

    /// Create a post stamped with the wall clock.
    pub fn new(content: impl Into<String>) -> Result<Self> {
        Self::create(content, &SystemClock)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    /// First `len` characters of the content, with an ellipsis when cut.
    pub fn summary(&self, len: usize) -> String {
        let mut summary: String = self.content.chars().take(len).collect();
        if self.content.chars().count() > len {
            summary.push_str("...");
        }
        summary
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}",
            util::display_timestamp(&self.created_at),
            self.content
        )
    }
}

/// Anything that owns a chronological list of posts.
pub trait Postable {
    /// All posts, oldest first.
    fn posts(&self) -> &[Post];

    /// The latest [`RECENT_POSTS_LIMIT`] posts, newest first.
    fn recent_posts(&self) -> Vec<&Post> {
        self.posts().iter().rev().take(RECENT_POSTS_LIMIT).collect()
    }
}
