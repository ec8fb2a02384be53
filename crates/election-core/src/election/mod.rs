//! Election aggregate: the unit of consistency.
//!
//! [`Election`] owns the party registry, the vote ledger and the election
//! parameters. Every mutating method validates its input before the first
//! write, so a failed call leaves the aggregate untouched. The aggregate is
//! not synchronised; the service wraps it in a lock.
//!
//! ## Invariants
//! - Each party's cached vote count equals the ledger entries naming it.
//! - After [`Election::recalculate_seats`] the seats add up to the budget
//!   when any vote exists, and to zero otherwise.

use chrono::{DateTime, Utc};

use crate::allocation::{AllocationEntry, SeatAllocation, allocate_dhondt};
use crate::domain::{
    ElectionName, IconRef, Party, PartyAbbreviation, PartyId, PartyName, PartyUpdate, SeatBudget,
    Vote, VoterId, VoterStatus,
};
use crate::error::ElectionError;
use crate::ledger::{AuditTrail, VoteLedger};
use crate::registry::PartyRegistry;
use crate::results::{AllocationStatus, ElectionResults, PartyResult, PartyTally, VotingActivity};

/// A single proportional-representation election.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Election {
    name: ElectionName,
    seat_budget: SeatBudget,
    registry: PartyRegistry,
    ledger: VoteLedger,
    allocation_status: AllocationStatus,
}

impl Election {
    /// Create an election with no parties and no votes.
    #[must_use]
    pub fn new(name: ElectionName, seat_budget: SeatBudget) -> Self {
        Self {
            name,
            seat_budget,
            registry: PartyRegistry::new(),
            ledger: VoteLedger::new(),
            allocation_status: AllocationStatus::NotCalculated,
        }
    }

    /// Election display name.
    #[must_use]
    pub const fn name(&self) -> &ElectionName {
        &self.name
    }

    /// Seats distributed by the next allocation.
    #[must_use]
    pub const fn seat_budget(&self) -> SeatBudget {
        self.seat_budget
    }

    /// Registered parties.
    #[must_use]
    pub const fn parties(&self) -> &PartyRegistry {
        &self.registry
    }

    /// Accepted votes.
    #[must_use]
    pub const fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    /// Freshness of the party seat counts.
    #[must_use]
    pub const fn allocation_status(&self) -> AllocationStatus {
        self.allocation_status
    }

    /// Replace the display name.
    pub fn rename(&mut self, name: ElectionName) {
        self.name = name;
    }

    /// Record a ballot for `party_id` on behalf of an already verified voter.
    ///
    /// A voter who already voted is rejected before the party is resolved,
    /// so a second ballot is always a [`ElectionError::DuplicateVote`].
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::DuplicateVote`] when the voter already voted
    /// and [`ElectionError::UnknownParty`] when `party_id` is not registered.
    pub fn cast_vote(
        &mut self,
        voter_id: VoterId,
        party_id: PartyId,
        cast_at: DateTime<Utc>,
    ) -> Result<Vote, ElectionError> {
        if self.ledger.has_voted(&voter_id) {
            return Err(ElectionError::duplicate_vote(voter_id));
        }
        if !self.registry.contains(party_id) {
            return Err(ElectionError::unknown_party(party_id));
        }
        let vote = self.ledger.record(voter_id, party_id, cast_at)?;
        self.registry.record_vote(party_id)?;
        self.mark_stale();
        Ok(vote)
    }

    /// Register a party.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::DuplicateParty`] when the name and
    /// abbreviation pair is taken.
    pub fn add_party(
        &mut self,
        name: PartyName,
        abbreviation: PartyAbbreviation,
        icon: Option<IconRef>,
    ) -> Result<Party, ElectionError> {
        let party = self.registry.add(name, abbreviation, icon)?;
        self.mark_stale();
        Ok(party)
    }

    /// Edit a party's name, abbreviation or icon. Seat counts stay valid.
    ///
    /// # Errors
    ///
    /// See [`PartyRegistry::update`].
    pub fn update_party(
        &mut self,
        party_id: PartyId,
        update: PartyUpdate,
    ) -> Result<Party, ElectionError> {
        self.registry.update(party_id, update)
    }

    /// Remove a party together with every vote cast for it.
    ///
    /// Voters whose ballots are discarded stay marked as having voted.
    /// Returns the removed party with its final vote count.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::PartyNotFound`] when `party_id` is unknown.
    pub fn remove_party(&mut self, party_id: PartyId) -> Result<Party, ElectionError> {
        let party = self.registry.remove(party_id)?;
        let removed = self.ledger.remove_votes_for_party(party_id);
        debug_assert_eq!(removed, party.vote_count(), "ledger and registry tallies diverged");
        self.mark_stale();
        Ok(party)
    }

    /// Change the number of seats. Existing seat counts become stale.
    pub fn set_seat_budget(&mut self, seat_budget: SeatBudget) {
        if self.seat_budget != seat_budget {
            self.seat_budget = seat_budget;
            self.mark_stale();
        }
    }

    /// Run D'Hondt over the current tallies, store the seat counts and return
    /// the allocation.
    pub fn recalculate_seats(&mut self) -> SeatAllocation {
        let entries: Vec<AllocationEntry> = self
            .registry
            .iter()
            .map(|party| AllocationEntry::new(party.id(), party.vote_count()))
            .collect();
        let allocation = allocate_dhondt(&entries, self.seat_budget);
        self.registry.apply_allocation(&allocation);
        self.allocation_status = AllocationStatus::Current;
        allocation
    }

    /// Clear every vote and voter and zero all counts. Parties, the name and
    /// the seat budget are kept.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.registry.reset_counts();
        self.allocation_status = AllocationStatus::NotCalculated;
    }

    /// Current results without recomputing seats.
    #[must_use]
    pub fn results(&self) -> ElectionResults {
        let total_votes = self.ledger.total_votes();
        let budget = self.seat_budget.get();
        let mut parties: Vec<PartyResult> = self
            .registry
            .iter()
            .map(|party| PartyResult::from_party(party, total_votes, budget))
            .collect();
        parties.sort_by(|left, right| right.vote_count.cmp(&left.vote_count));
        ElectionResults {
            election_name: self.name.to_string(),
            seat_budget: budget,
            total_votes,
            total_seats: self.registry.total_seats(),
            status: self.allocation_status,
            parties,
        }
    }

    /// Whether `voter_id` has voted.
    #[must_use]
    pub fn voter_status(&self, voter_id: &VoterId) -> VoterStatus {
        self.ledger.voter_status(voter_id)
    }

    /// Totals, per-party tallies and the `recent_limit` newest votes.
    #[must_use]
    pub fn voting_activity(&self, recent_limit: usize) -> VotingActivity {
        VotingActivity {
            total_votes: self.ledger.total_votes(),
            tallies: self
                .registry
                .iter()
                .map(|party| PartyTally {
                    party_id: party.id(),
                    abbreviation: party.abbreviation().to_string(),
                    vote_count: party.vote_count(),
                })
                .collect(),
            recent_votes: self.ledger.recent(recent_limit).cloned().collect(),
        }
    }

    /// Immutable copy of the ledger in insertion order.
    #[must_use]
    pub fn all_votes(&self) -> AuditTrail {
        self.ledger.snapshot()
    }

    fn mark_stale(&mut self) {
        if self.allocation_status == AllocationStatus::Current {
            self.allocation_status = AllocationStatus::Stale;
        }
    }
}

#[cfg(test)]
mod tests;
