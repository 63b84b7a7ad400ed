use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GitGraphError, Result};

/// A validated 40-character lowercase hex commit hash.
///
/// [`CommitHash::parse`] validates untrusted input. [`CommitHash::new_unchecked`]
/// skips validation for parser-internal callers that already checked the
/// format themselves; misuse of the unchecked path is a logic bug, not a
/// safety issue, since the type carries no invariants beyond its contents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitHash(String);

impl CommitHash {
    pub fn parse(raw: &str) -> Result<Self> {
        if is_valid_hash(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(GitGraphError::InvalidHash(raw.to_string()))
        }
    }

    /// Build a hash from input already known to be 40 lowercase hex chars.
    pub fn new_unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommitHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn is_valid_hash(raw: &str) -> bool {
    raw.len() == 40 && raw.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
