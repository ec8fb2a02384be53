//! Voter identity as handed over by the identity verification collaborator.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors returned by [`VoterId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoterIdValidationError {
    /// The identifier is empty.
    #[error("voter id must not be empty")]
    Empty,
    /// The identifier carries leading or trailing whitespace.
    #[error("voter id must not have surrounding whitespace")]
    SurroundingWhitespace,
}

/// Stable, already verified voter identifier (for example a national ID).
///
/// Distinct from any login or display name. Comparison is exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoterId(String);

impl VoterId {
    /// Validate and construct a [`VoterId`].
    ///
    /// # Errors
    ///
    /// Returns [`VoterIdValidationError`] when the identifier is empty or has
    /// surrounding whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, VoterIdValidationError> {
        Self::from_owned(id.into())
    }

    fn from_owned(id: String) -> Result<Self, VoterIdValidationError> {
        if id.is_empty() {
            return Err(VoterIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(VoterIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for VoterId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<VoterId> for String {
    fn from(value: VoterId) -> Self {
        value.0
    }
}

impl TryFrom<String> for VoterId {
    type Error = VoterIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Per-voter voting state.
///
/// `NotVoted` moves to `Voted` on the first accepted ballot and only returns
/// to `NotVoted` through an election reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoterStatus {
    /// No ballot accepted for this voter.
    NotVoted,
    /// A ballot has been accepted for this voter.
    Voted,
}

impl VoterStatus {
    /// Whether the voter has already voted.
    #[must_use]
    pub const fn has_voted(self) -> bool {
        matches!(self, Self::Voted)
    }
}
