//! Append-only vote ledger enforcing one vote per voter.
//!
//! The per-voter index is the single source of truth for duplicate checks.
//! It only shrinks on [`VoteLedger::clear`]; removing a party's votes keeps
//! those voters marked as having voted.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{PartyId, Vote, VoterId, VoterStatus};
use crate::error::ElectionError;

/// Ordered record of accepted votes plus per-voter and per-party indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteLedger {
    votes: Arc<Vec<Vote>>,
    voters: HashSet<VoterId>,
    tallies: HashMap<PartyId, u64>,
}

impl VoteLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vote unless `voter_id` already voted.
    ///
    /// The ledger does not know which parties exist; the election aggregate
    /// checks the party before calling this.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::DuplicateVote`] without touching the ledger
    /// when the voter already has a recorded vote.
    pub fn record(
        &mut self,
        voter_id: VoterId,
        party_id: PartyId,
        cast_at: DateTime<Utc>,
    ) -> Result<Vote, ElectionError> {
        if self.voters.contains(&voter_id) {
            return Err(ElectionError::duplicate_vote(voter_id));
        }
        let vote = Vote::new(voter_id.clone(), party_id, cast_at);
        self.voters.insert(voter_id);
        let tally = self.tallies.entry(party_id).or_insert(0);
        *tally = tally.saturating_add(1);
        Arc::make_mut(&mut self.votes).push(vote.clone());
        Ok(vote)
    }

    /// Whether `voter_id` has a recorded vote.
    #[must_use]
    pub fn has_voted(&self, voter_id: &VoterId) -> bool {
        self.voters.contains(voter_id)
    }

    /// Voting state of `voter_id`.
    #[must_use]
    pub fn voter_status(&self, voter_id: &VoterId) -> VoterStatus {
        if self.has_voted(voter_id) {
            VoterStatus::Voted
        } else {
            VoterStatus::NotVoted
        }
    }

    /// Number of votes currently held for `party_id`.
    #[must_use]
    pub fn votes_for_party(&self, party_id: PartyId) -> u64 {
        self.tallies.get(&party_id).copied().unwrap_or(0)
    }

    /// Number of votes currently held in the ledger.
    #[must_use]
    pub fn total_votes(&self) -> u64 {
        self.tallies.values().sum()
    }

    /// Votes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vote> {
        self.votes.iter()
    }

    /// The `limit` most recent votes, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &Vote> + '_ {
        self.votes.iter().rev().take(limit)
    }

    /// Share the current votes as an immutable [`AuditTrail`].
    ///
    /// Taking a snapshot does not copy. The next write clones the vote list
    /// while any snapshot still holds it.
    #[must_use]
    pub fn snapshot(&self) -> AuditTrail {
        AuditTrail(Arc::clone(&self.votes))
    }

    /// Drop every vote for `party_id` and return how many were removed.
    pub(crate) fn remove_votes_for_party(&mut self, party_id: PartyId) -> u64 {
        Arc::make_mut(&mut self.votes).retain(|vote| vote.party_id() != party_id);
        self.tallies.remove(&party_id).unwrap_or(0)
    }

    /// Forget every vote and every voter.
    pub(crate) fn clear(&mut self) {
        self.votes = Arc::default();
        self.voters.clear();
        self.tallies.clear();
    }
}

/// Immutable snapshot of the ledger in insertion order.
///
/// Iteration can be restarted any number of times and never observes later
/// ledger mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTrail(Arc<Vec<Vote>>);

impl AuditTrail {
    /// Iterate over the captured votes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vote> {
        self.0.iter()
    }

    /// Number of captured votes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot holds no votes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a AuditTrail {
    type Item = &'a Vote;
    type IntoIter = std::slice::Iter<'a, Vote>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a VoteLedger {
    type Item = &'a Vote;
    type IntoIter = std::slice::Iter<'a, Vote>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
