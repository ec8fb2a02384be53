//! Election service: the sole mutation boundary around the aggregate.
//!
//! The aggregate sits behind a [`RwLock`]. Every mutation, including seat
//! recalculation, holds the write lock for its whole check-then-act
//! sequence, so two ballots from the same voter can never both be accepted.
//! Projections take the read lock and return owned snapshots.
//!
//! A poisoned lock is reported as [`ElectionError::StateUnavailable`].

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::config::ElectionSettings;
use crate::domain::{
    ElectionName, Party, PartyId, PartyUpdate, SeatBudget, Vote, VoterId, VoterStatus,
};
use crate::election::Election;
use crate::error::ElectionError;
use crate::ledger::AuditTrail;
use crate::ports::{AddPartyRequest, CastVoteRequest, ElectionCommand, ElectionQuery};
use crate::results::{ElectionResults, VotingActivity};

/// Thread-safe owner of one [`Election`].
pub struct ElectionService {
    election: RwLock<Election>,
    clock: Arc<dyn Clock>,
}

impl ElectionService {
    /// Wrap an existing election. Vote timestamps are read from `clock`.
    #[must_use]
    pub fn new(election: Election, clock: Arc<dyn Clock>) -> Self {
        Self {
            election: RwLock::new(election),
            clock,
        }
    }

    /// Build an empty election from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::InvalidElectionName`] or
    /// [`ElectionError::InvalidSeatBudget`] when the settings are invalid.
    pub fn from_settings(
        settings: &ElectionSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ElectionError> {
        let name = settings.election_name()?;
        let seat_budget = settings.seat_budget()?;
        info!(election = %name, seats = seat_budget.get(), "election created");
        Ok(Self::new(Election::new(name, seat_budget), clock))
    }

    /// Current election name.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::StateUnavailable`] when the lock is poisoned.
    pub fn election_name(&self) -> Result<ElectionName, ElectionError> {
        Ok(self.read()?.name().clone())
    }

    /// Current seat budget.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::StateUnavailable`] when the lock is poisoned.
    pub fn seat_budget(&self) -> Result<SeatBudget, ElectionError> {
        Ok(self.read()?.seat_budget())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Election>, ElectionError> {
        self.election
            .read()
            .map_err(|_| ElectionError::state_unavailable("election state lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Election>, ElectionError> {
        self.election
            .write()
            .map_err(|_| ElectionError::state_unavailable("election state lock poisoned"))
    }
}

impl std::fmt::Debug for ElectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElectionService")
            .field("election", &self.election)
            .finish_non_exhaustive()
    }
}

fn log_rejection(operation: &'static str, error: &ElectionError) {
    warn!(operation, code = ?error.code(), %error, "election operation rejected");
}

impl ElectionCommand for ElectionService {
    fn cast_vote(&self, request: CastVoteRequest) -> Result<Vote, ElectionError> {
        let CastVoteRequest { voter_id, party_id } = request;
        let mut election = self.write()?;
        let cast_at = self.clock.utc();
        let vote = election
            .cast_vote(voter_id, party_id, cast_at)
            .inspect_err(|err| log_rejection("cast_vote", err))?;
        info!(
            voter_id = %vote.voter_id(),
            party_id = %vote.party_id(),
            total_votes = election.ledger().total_votes(),
            "vote accepted"
        );
        Ok(vote)
    }

    fn add_party(&self, request: AddPartyRequest) -> Result<Party, ElectionError> {
        let AddPartyRequest {
            name,
            abbreviation,
            icon,
        } = request;
        let party = self
            .write()?
            .add_party(name, abbreviation, icon)
            .inspect_err(|err| log_rejection("add_party", err))?;
        info!(
            party_id = %party.id(),
            name = %party.name(),
            abbreviation = %party.abbreviation(),
            "party registered"
        );
        Ok(party)
    }

    fn update_party(
        &self,
        party_id: PartyId,
        update: PartyUpdate,
    ) -> Result<Party, ElectionError> {
        let party = self
            .write()?
            .update_party(party_id, update)
            .inspect_err(|err| log_rejection("update_party", err))?;
        info!(
            party_id = %party.id(),
            name = %party.name(),
            abbreviation = %party.abbreviation(),
            "party updated"
        );
        Ok(party)
    }

    fn remove_party(&self, party_id: PartyId) -> Result<Party, ElectionError> {
        let party = self
            .write()?
            .remove_party(party_id)
            .inspect_err(|err| log_rejection("remove_party", err))?;
        info!(
            party_id = %party.id(),
            votes_removed = party.vote_count(),
            "party removed with its votes"
        );
        Ok(party)
    }

    fn set_seat_budget(&self, seats: i64) -> Result<SeatBudget, ElectionError> {
        let seat_budget =
            SeatBudget::new(seats).inspect_err(|err| log_rejection("set_seat_budget", err))?;
        self.write()?.set_seat_budget(seat_budget);
        info!(seats = seat_budget.get(), "seat budget changed");
        Ok(seat_budget)
    }

    fn recalculate_seats(&self) -> Result<ElectionResults, ElectionError> {
        let mut election = self.write()?;
        let allocation = election.recalculate_seats();
        debug!(
            parties = allocation.iter().len(),
            rounds = allocation.awards().len(),
            "d'hondt allocation finished"
        );
        let results = election.results();
        info!(
            total_votes = results.total_votes,
            total_seats = results.total_seats,
            seat_budget = results.seat_budget,
            "seats recalculated"
        );
        Ok(results)
    }

    fn reset_election(&self) -> Result<(), ElectionError> {
        let mut election = self.write()?;
        let discarded = election.ledger().total_votes();
        election.reset();
        info!(votes_discarded = discarded, "election reset");
        Ok(())
    }

    fn rename_election(&self, name: &str) -> Result<(), ElectionError> {
        let election_name =
            ElectionName::new(name).inspect_err(|err| log_rejection("rename_election", err))?;
        self.write()?.rename(election_name.clone());
        info!(election = %election_name, "election renamed");
        Ok(())
    }
}

impl ElectionQuery for ElectionService {
    fn results(&self) -> Result<ElectionResults, ElectionError> {
        Ok(self.read()?.results())
    }

    fn voter_status(&self, voter_id: &VoterId) -> Result<VoterStatus, ElectionError> {
        Ok(self.read()?.voter_status(voter_id))
    }

    fn voting_activity(&self, recent_limit: usize) -> Result<VotingActivity, ElectionError> {
        Ok(self.read()?.voting_activity(recent_limit))
    }

    fn all_votes(&self) -> Result<AuditTrail, ElectionError> {
        Ok(self.read()?.all_votes())
    }

    fn parties(&self) -> Result<Vec<Party>, ElectionError> {
        Ok(self.read()?.parties().iter().cloned().collect())
    }

    fn party(&self, party_id: PartyId) -> Result<Option<Party>, ElectionError> {
        Ok(self.read()?.parties().get(party_id).cloned())
    }

    fn find_party_by_name(&self, name: &str) -> Result<Option<Party>, ElectionError> {
        Ok(self.read()?.parties().find_by_name(name).cloned())
    }

    fn find_party_by_abbreviation(
        &self,
        abbreviation: &str,
    ) -> Result<Option<Party>, ElectionError> {
        Ok(self.read()?.parties().find_by_abbreviation(abbreviation).cloned())
    }
}
