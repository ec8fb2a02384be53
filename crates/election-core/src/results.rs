//! Read-only projections handed to presentation and reporting adapters.

use serde::Serialize;

use crate::domain::{Party, PartyId, Vote};

/// Whether party seat counts reflect the current votes, parties and budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationStatus {
    /// No allocation has run since the election was created or reset.
    NotCalculated,
    /// Seat counts match the current state.
    Current,
    /// Votes, parties or the seat budget changed after the last allocation.
    Stale,
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyResult {
    /// Party identifier.
    pub party_id: PartyId,
    /// Party display name.
    pub party_name: String,
    /// Party abbreviation.
    pub abbreviation: String,
    /// Votes received.
    pub vote_count: u64,
    /// Seats held after the last allocation.
    pub seat_count: u32,
    /// Share of all votes, in percent.
    pub vote_percentage: f64,
    /// Share of the seat budget, in percent.
    pub seat_percentage: f64,
}

impl PartyResult {
    pub(crate) fn from_party(party: &Party, total_votes: u64, seat_budget: u32) -> Self {
        Self {
            party_id: party.id(),
            party_name: party.name().to_string(),
            abbreviation: party.abbreviation().to_string(),
            vote_count: party.vote_count(),
            seat_count: party.seat_count(),
            vote_percentage: percentage(party.vote_count(), total_votes),
            seat_percentage: percentage(u64::from(party.seat_count()), u64::from(seat_budget)),
        }
    }
}

/// Results of an election, ordered by votes (descending) then registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResults {
    /// Election display name.
    pub election_name: String,
    /// Seats available in the election.
    pub seat_budget: u32,
    /// Votes held in the ledger.
    pub total_votes: u64,
    /// Seats currently assigned across all parties.
    pub total_seats: u32,
    /// Freshness of the seat counts.
    pub status: AllocationStatus,
    /// Per-party rows.
    pub parties: Vec<PartyResult>,
}

impl ElectionResults {
    /// Row for `party_id`, if the party is registered.
    #[must_use]
    pub fn party(&self, party_id: PartyId) -> Option<&PartyResult> {
        self.parties.iter().find(|row| row.party_id == party_id)
    }

    /// Render the results as indented camelCase JSON.
    ///
    /// # Errors
    ///
    /// Propagates [`serde_json::Error`] from serialization.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Vote count of one party, for activity monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyTally {
    /// Party identifier.
    pub party_id: PartyId,
    /// Party abbreviation.
    pub abbreviation: String,
    /// Votes received.
    pub vote_count: u64,
}

/// Snapshot of voting progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingActivity {
    /// Votes held in the ledger.
    pub total_votes: u64,
    /// Per-party tallies in registration order.
    pub tallies: Vec<PartyTally>,
    /// Most recent votes, newest first.
    pub recent_votes: Vec<Vote>,
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "percentages are display values; tallies far below 2^52 are exact"
)]
fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}
