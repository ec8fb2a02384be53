//! Immutable vote record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PartyId, VoterId};

/// A single accepted ballot. Never mutated once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    voter_id: VoterId,
    party_id: PartyId,
    cast_at: DateTime<Utc>,
}

impl Vote {
    pub(crate) const fn new(voter_id: VoterId, party_id: PartyId, cast_at: DateTime<Utc>) -> Self {
        Self {
            voter_id,
            party_id,
            cast_at,
        }
    }

    /// Voter who cast the ballot.
    #[must_use]
    pub const fn voter_id(&self) -> &VoterId {
        &self.voter_id
    }

    /// Party that received the ballot.
    #[must_use]
    pub const fn party_id(&self) -> PartyId {
        self.party_id
    }

    /// When the ballot was accepted.
    #[must_use]
    pub const fn cast_at(&self) -> DateTime<Utc> {
        self.cast_at
    }
}
