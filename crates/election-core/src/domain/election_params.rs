//! Election-wide parameters: display name and seat budget.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::ElectionError;

/// Number of seats distributed by one allocation run. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct SeatBudget(NonZeroU32);

impl SeatBudget {
    /// Validate and construct a [`SeatBudget`].
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::InvalidSeatBudget`] when `seats` is zero,
    /// negative, or larger than `u32::MAX`.
    ///
    /// # Examples
    /// ```
    /// use election_core::SeatBudget;
    ///
    /// assert_eq!(SeatBudget::new(7).map(SeatBudget::get), Ok(7));
    /// assert!(SeatBudget::new(0).is_err());
    /// assert!(SeatBudget::new(-3).is_err());
    /// ```
    pub fn new(seats: i64) -> Result<Self, ElectionError> {
        u32::try_from(seats)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| ElectionError::invalid_seat_budget(seats))
    }

    /// Seat count as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<i64> for SeatBudget {
    type Error = ElectionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SeatBudget> for u32 {
    fn from(value: SeatBudget) -> Self {
        value.get()
    }
}

impl fmt::Display for SeatBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable election title, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElectionName(String);

impl ElectionName {
    /// Validate and construct an [`ElectionName`].
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::InvalidElectionName`] when the trimmed input
    /// is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ElectionError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, ElectionError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ElectionError::invalid_election_name(
                "election name must not be empty",
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ElectionName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ElectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ElectionName> for String {
    fn from(value: ElectionName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ElectionName {
    type Error = ElectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}
