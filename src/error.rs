//! Error types for the social network core and its console front end.

use thiserror::Error;

/// Result type alias using `SocialError`
pub type Result<T> = std::result::Result<T, SocialError>;

/// Errors signaled by the social network.
///
/// Only a handful of operations can fail; lookups return `Option` and
/// friendship mutations on an already consistent state are no-ops.
#[derive(Error, Debug)]
pub enum SocialError {
    /// Post content is longer than the allowed number of characters
    #[error("Post may not exceed {max} characters (got {length})")]
    ContentTooLong { length: usize, max: usize },

    /// A user tried to befriend itself
    #[error("{0} cannot be their own friend")]
    SelfFriendship(String),

    /// Identity is not registered in the network
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Identity must not be empty
    #[error("Username must not be empty")]
    EmptyIdentity,

    /// Identity is already registered
    #[error("Username already taken: {0}")]
    DuplicateIdentity(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    /// Console I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SocialError {
    pub fn user_not_found(identity: impl Into<String>) -> Self {
        Self::UserNotFound(identity.into())
    }

    pub fn self_friendship(identity: impl Into<String>) -> Self {
        Self::SelfFriendship(identity.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_too_long_message() {
        let err = SocialError::ContentTooLong { length: 251, max: 250 };
        assert_eq!(err.to_string(), "Post may not exceed 250 characters (got 251)");
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed");
        let err = SocialError::from(io);
        assert_eq!(err.to_string(), "stdin closed");
    }
}
