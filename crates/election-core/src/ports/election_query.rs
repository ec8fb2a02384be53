//! Driving port for read-only election projections.

use crate::domain::{Party, PartyId, VoterId, VoterStatus};
use crate::error::ElectionError;
use crate::ledger::AuditTrail;
use crate::results::{ElectionResults, VotingActivity};

/// Domain use-case port for reporting and lookups.
///
/// Queries never mutate state. They fail only with
/// [`ElectionError::StateUnavailable`].
pub trait ElectionQuery: Send + Sync {
    /// Current results, flagged with their allocation status.
    fn results(&self) -> Result<ElectionResults, ElectionError>;

    /// Whether the voter has already voted.
    fn voter_status(&self, voter_id: &VoterId) -> Result<VoterStatus, ElectionError>;

    /// Totals, tallies and the `recent_limit` newest votes.
    fn voting_activity(&self, recent_limit: usize) -> Result<VotingActivity, ElectionError>;

    /// Immutable snapshot of every accepted vote in insertion order.
    fn all_votes(&self) -> Result<AuditTrail, ElectionError>;

    /// Registered parties in registration order.
    fn parties(&self) -> Result<Vec<Party>, ElectionError>;

    /// Look up a party by identifier.
    fn party(&self, party_id: PartyId) -> Result<Option<Party>, ElectionError>;

    /// Case-insensitive lookup by display name.
    fn find_party_by_name(&self, name: &str) -> Result<Option<Party>, ElectionError>;

    /// Case-insensitive lookup by abbreviation.
    fn find_party_by_abbreviation(
        &self,
        abbreviation: &str,
    ) -> Result<Option<Party>, ElectionError>;
}
