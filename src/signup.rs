//! Signup rules checked by the console before an account is created.
//!
//! These are front-end policy, not core invariants: the network itself
//! accepts any email and any credential.

use crate::error::{Result, SocialError};

pub const DEFAULT_EMAIL_DOMAIN: &str = "@ttu.edu";
pub const DEFAULT_SPECIAL_CHARS: &str = "!@#$%^&*()";

/// The email must end with `suffix` and have something before it.
pub fn validate_email(email: &str, suffix: &str) -> Result<()> {
    match email.strip_suffix(suffix) {
        Some(local) if !local.is_empty() => Ok(()),
        Some(_) => Err(SocialError::InvalidEmail(
            "Email must have a name before the domain".to_string(),
        )),
        None => Err(SocialError::InvalidEmail(format!(
            "Email must end with {suffix}"
        ))),
    }
}

/// The password must contain at least one of `specials`.
pub fn validate_password(password: &str, specials: &str) -> Result<()> {
    if password.chars().any(|c| specials.contains(c)) {
        Ok(())
    } else {
        Err(SocialError::InvalidPassword(
            "Password must contain at least one special character".to_string(),
        ))
    }
}
