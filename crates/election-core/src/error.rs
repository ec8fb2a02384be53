//! Error types for the election core.
//!
//! Every operation returns these errors explicitly; none of them is
//! transient, so retrying with the same input always fails the same way.
//! Adapters branch on [`ElectionErrorCode`] rather than on message text.

use crate::domain::{PartyId, VoterId};
use crate::macros::define_election_error;

define_election_error! {
    /// Failures surfaced by election operations.
    ///
    /// # Examples
    /// ```
    /// use election_core::{ElectionError, ElectionErrorCode, VoterId};
    ///
    /// let voter = VoterId::new("V1").expect("valid voter id");
    /// let err = ElectionError::duplicate_vote(voter);
    /// assert_eq!(err.code(), ElectionErrorCode::DuplicateVote);
    /// assert_eq!(err.to_string(), "voter V1 has already voted");
    /// ```
    pub enum ElectionError coded as ElectionErrorCode {
        /// The voter already has a recorded vote.
        DuplicateVote {
            /// Voter whose second ballot was rejected.
            voter_id: VoterId,
        } => "voter {voter_id} has already voted",
        /// A vote or lookup referenced a party that is not registered.
        UnknownParty {
            /// Identifier that failed to resolve.
            party_id: PartyId,
        } => "party {party_id} is not registered in this election",
        /// Another party already uses the same name and abbreviation.
        DuplicateParty {
            /// Conflicting party name.
            name: String,
            /// Conflicting abbreviation.
            abbreviation: String,
        } => "a party named '{name}' ({abbreviation}) is already registered",
        /// The party targeted by an update or removal does not exist.
        PartyNotFound {
            /// Identifier that failed to resolve.
            party_id: PartyId,
        } => "party {party_id} not found",
        /// The requested seat budget is not a positive 32-bit count.
        InvalidSeatBudget {
            /// Budget supplied by the caller.
            requested: i64,
        } => "seat budget must be a positive number of seats (got {requested})",
        /// Party name or abbreviation failed validation.
        InvalidParty {
            /// Validation failure description.
            message: String,
        } => "invalid party details: {message}",
        /// The election name failed validation.
        InvalidElectionName {
            /// Validation failure description.
            message: String,
        } => "invalid election name: {message}",
        /// The election state lock was poisoned by a panicking caller.
        StateUnavailable {
            /// Description of the unavailable state.
            message: String,
        } => "election state unavailable: {message}",
    }
}

impl From<crate::domain::PartyValidationError> for ElectionError {
    fn from(value: crate::domain::PartyValidationError) -> Self {
        Self::invalid_party(value.to_string())
    }
}
