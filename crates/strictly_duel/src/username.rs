//! Player display names.

use crate::wire::MAX_LINE_LEN;
use serde::Serialize;
use tracing::instrument;

/// A validated display name: non-empty, alphanumeric, and short enough to
/// fit on one wire line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub struct Username(String);

impl Username {
    /// Validates `raw` as a username.
    ///
    /// # Errors
    ///
    /// Rejects empty strings, names over [`MAX_LINE_LEN`] bytes, and anything
    /// containing a character that is not a letter or digit, including
    /// whitespace.
    #[instrument(skip(raw), fields(len = raw.len()))]
    pub fn parse(raw: &str) -> Result<Self, UsernameError> {
        if raw.is_empty() {
            return Err(UsernameError::Empty);
        }
        if raw.len() > MAX_LINE_LEN {
            return Err(UsernameError::TooLong(raw.len()));
        }
        if let Some(bad) = raw.chars().find(|c| !c.is_alphanumeric()) {
            return Err(UsernameError::NotAlphanumeric(bad));
        }
        Ok(Self(raw.to_string()))
    }

    /// The name as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Why a username was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum UsernameError {
    /// Nothing was entered.
    #[display("Invalid username, must not be empty.")]
    Empty,
    /// Contains a character other than a letter or digit.
    #[display("Invalid username, must be alphanumeric ({:?} is not allowed).", _0)]
    NotAlphanumeric(char),
    /// Longer in bytes than a single protocol line allows.
    #[display("Invalid username, must be at most {} bytes (got {}).", MAX_LINE_LEN, _0)]
    TooLong(usize),
}

impl std::error::Error for UsernameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanumeric_accepted() {
        let name = Username::parse("abc123").unwrap();
        assert_eq!(name.as_str(), "abc123");
    }

    #[test]
    fn test_space_rejected() {
        assert_eq!(
            Username::parse("abc 123"),
            Err(UsernameError::NotAlphanumeric(' '))
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
    }

    #[test]
    fn test_punctuation_rejected() {
        assert!(Username::parse("bob!").is_err());
        assert!(Username::parse("a\nb").is_err());
    }

    #[test]
    fn test_longest_name_accepted() {
        let raw = "a".repeat(MAX_LINE_LEN);
        assert_eq!(Username::parse(&raw).unwrap().as_str(), raw);
    }

    #[test]
    fn test_overlong_name_rejected() {
        let raw = "a".repeat(1500);
        assert_eq!(Username::parse(&raw), Err(UsernameError::TooLong(1500)));
    }

    #[test]
    fn test_length_counts_bytes() {
        // 'é' is two bytes in UTF-8.
        let raw = "é".repeat(MAX_LINE_LEN / 2 + 1);
        assert!(matches!(
            Username::parse(&raw),
            Err(UsernameError::TooLong(_))
        ));
    }
}
