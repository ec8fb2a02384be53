//! Driving port for election mutations.
//!
//! Every method is synchronous and runs inside the aggregate's exclusive
//! section; a failed call leaves the election unchanged.

use serde::{Deserialize, Serialize};

use crate::domain::{
    IconRef, Party, PartyAbbreviation, PartyId, PartyName, PartyUpdate, SeatBudget, Vote,
    VoterId,
};
use crate::error::ElectionError;
use crate::results::ElectionResults;

/// Ballot handed over by the identity verification collaborator.
///
/// The voter identifier is trusted to have been verified already.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    /// Verified voter identifier.
    pub voter_id: VoterId,
    /// Party receiving the ballot.
    pub party_id: PartyId,
}

impl CastVoteRequest {
    /// Pair a verified voter with the chosen party.
    #[must_use]
    pub const fn new(voter_id: VoterId, party_id: PartyId) -> Self {
        Self { voter_id, party_id }
    }
}

/// Party registration submitted by an administrator.
///
/// Deserialization validates the name and abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPartyRequest {
    /// Display name.
    pub name: PartyName,
    /// Short label.
    pub abbreviation: PartyAbbreviation,
    /// Opaque icon reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRef>,
}

impl AddPartyRequest {
    /// Validate raw administrator input.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::InvalidParty`] when the name is blank or the
    /// abbreviation is blank or too long.
    pub fn new(
        name: impl Into<String>,
        abbreviation: impl Into<String>,
    ) -> Result<Self, ElectionError> {
        Ok(Self {
            name: PartyName::new(name)?,
            abbreviation: PartyAbbreviation::new(abbreviation)?,
            icon: None,
        })
    }

    /// Attach an icon reference.
    #[must_use]
    pub fn with_icon(mut self, icon: IconRef) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// Domain use-case port for changing election state.
pub trait ElectionCommand: Send + Sync {
    /// Accept a ballot unless the voter already voted or the party is unknown.
    fn cast_vote(&self, request: CastVoteRequest) -> Result<Vote, ElectionError>;

    /// Register a party.
    fn add_party(&self, request: AddPartyRequest) -> Result<Party, ElectionError>;

    /// Edit a registered party.
    fn update_party(&self, party_id: PartyId, update: PartyUpdate)
    -> Result<Party, ElectionError>;

    /// Remove a party and every vote cast for it.
    fn remove_party(&self, party_id: PartyId) -> Result<Party, ElectionError>;

    /// Validate and store a new seat budget without reallocating.
    fn set_seat_budget(&self, seats: i64) -> Result<SeatBudget, ElectionError>;

    /// Allocate seats from the current tallies and return the results.
    fn recalculate_seats(&self) -> Result<ElectionResults, ElectionError>;

    /// Drop every vote and voter while keeping parties and the budget.
    fn reset_election(&self) -> Result<(), ElectionError>;

    /// Change the election display name.
    fn rename_election(&self, name: &str) -> Result<(), ElectionError>;
}
