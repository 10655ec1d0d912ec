//! # peeper
//!
//! A small in-memory social network: accounts, a symmetric friendship graph,
//! per-user posts and a ranked activity feed built from friends' recent posts.
//!
//! ## Overview
//!
//! The core is a handful of plain data types with no I/O. A [`Network`] is the
//! registry of [`User`]s, each user owns its [`Post`]s, and [`FeedAggregator`]
//! derives the friends activity feed. A text [`console`] front end sits on top
//! and is what the `peeper` binary runs.
//!
//! ## Features
//!
//! - **Symmetric friendships**: both sides of a friendship change in one call
//! - **Recent posts**: the 3 latest posts of a user, newest first
//! - **Activity feed**: friends' recent posts merged, ranked newest first and capped at 3
//! - **Console**: login, signup, posting and friend management over any reader/writer
//!
//! ## Quick Start
//!
//! ```rust
//! use peeper::{FeedAggregator, Network, Post, User};
//!
//! fn main() -> Result<(), peeper::SocialError> {
//!     let mut network = Network::new();
//!     network.register(User::new("rory", "rory@ttu.edu", "pw!")?)?;
//!     network.register(User::new("simon", "simon@ttu.edu", "pw!")?)?;
//!     network.add_friend("rory", "simon")?;
//!
//!     if let Some(simon) = network.get_user_mut("simon") {
//!         simon.add_post(Post::new("Hello from Lubbock")?);
//!     }
//!
//!     let rory = network.require_user("rory")?;
//!     for post in FeedAggregator::new(&network).recent_feed(rory) {
//!         println!("{post}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod console;
pub mod error;
pub mod feed;
pub mod network;
pub mod post;
pub mod signup;
pub mod user;
pub mod util;

pub use error::{Result, SocialError};
pub use feed::{aggregate, Feed, FeedAggregator, FeedEntry, FEED_LIMIT};
pub use network::Network;
pub use post::{Post, Postable, MAX_POST_LENGTH, RECENT_POSTS_LIMIT};
pub use user::User;
pub use util::{Clock, ManualClock, SystemClock};
