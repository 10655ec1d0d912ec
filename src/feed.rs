//! Feed module for the friends activity feed.
//!
//! The feed merges the recent posts of every friend of a user, sorts them
//! newest first and keeps the top [`FEED_LIMIT`]. Each friend contributes at
//! most [`RECENT_POSTS_LIMIT`](crate::post::RECENT_POSTS_LIMIT) candidates, so
//! building a feed costs O(friends) no matter how much anyone has posted.

use chrono::{DateTime, FixedOffset};

use crate::network::Network;
use crate::post::{Post, Postable};
use crate::user::User;
use crate::util;

/// Maximum number of posts in an activity feed.
pub const FEED_LIMIT: usize = 3;

/// A post in a feed together with the identity of its author.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedEntry<'a> {
    pub author: &'a str,
    pub post: &'a Post,
}

/// A ranked, bounded list of friends' posts, newest first.
#[derive(Clone, Debug, Default)]
pub struct Feed<'a> {
    pub entries: Vec<FeedEntry<'a>>,
}

impl<'a> Feed<'a> {
    pub fn posts(&self) -> Vec<&'a Post> {
        self.entries.iter().map(|entry| entry.post).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedEntry<'a>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for Feed<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            writeln!(
                f,
                "{} • {}",
                entry.author,
                util::display_timestamp(&entry.post.created_at())
            )?;
            writeln!(f, "\t{}", entry.post.content())?;
        }
        Ok(())
    }
}

/// Builds activity feeds by resolving friend identities through a network.
pub struct FeedAggregator<'a> {
    network: &'a Network,
}

impl<'a> FeedAggregator<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self { network }
    }

    /// The activity feed of `user`, as plain posts.
    ///
    /// A friendless user gets an empty list. Nothing is mutated.
    pub fn recent_feed(&self, user: &User) -> Vec<&'a Post> {
        self.feed(user).posts()
    }

    /// The activity feed of `user`, with authors attached.
    pub fn feed(&self, user: &User) -> Feed<'a> {
        let network = self.network;
        let candidates = user
            .friends()
            .iter()
            .filter_map(|identity| network.get_user(identity))
            .flat_map(|friend| {
                friend
                    .recent_posts()
                    .into_iter()
                    .map(move |post| FeedEntry {
                        author: friend.identity(),
                        post,
                    })
            });

        Feed {
            entries: rank(candidates, |entry: &FeedEntry<'a>| entry.post.created_at()),
        }
    }
}

/// Merge the recent posts of any post-bearing sources into one ranked feed.
///
/// Sources are visited in iteration order; posts with equal timestamps keep
/// that order, then each source's own newest-first order.
pub fn aggregate<'a, P>(sources: impl IntoIterator<Item = &'a P>) -> Vec<&'a Post>
where
    P: Postable + 'a,
{
    let candidates = sources
        .into_iter()
        .flat_map(|source| source.recent_posts());
    rank(candidates, |post: &&'a Post| post.created_at())
}

// Stable sort, newest first, then cut to the feed size.
fn rank<T>(
    candidates: impl Iterator<Item = T>,
    created_at: impl Fn(&T) -> DateTime<FixedOffset>,
) -> Vec<T> {
    let mut merged: Vec<T> = candidates.collect();
    merged.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    merged.truncate(FEED_LIMIT);
    merged
}
