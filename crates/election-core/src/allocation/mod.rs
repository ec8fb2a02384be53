//! D'Hondt highest-averages seat allocation.
//!
//! [`allocate_dhondt`] is a pure function: it reads a slice of per-party
//! tallies and returns a fresh [`SeatAllocation`] without touching any other
//! state. Quotients are compared by cross-multiplication in `u128`, so no
//! floating point or integer division is involved and results are exact.

use crate::domain::{PartyId, SeatBudget};

/// One party's input to an allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationEntry {
    /// Party the votes belong to.
    pub party_id: PartyId,
    /// Votes currently held by the party.
    pub votes: u64,
}

impl AllocationEntry {
    /// Pair a party with its vote count.
    #[must_use]
    pub const fn new(party_id: PartyId, votes: u64) -> Self {
        Self { party_id, votes }
    }
}

/// Seats awarded to one party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartySeats {
    /// Party that received the seats.
    pub party_id: PartyId,
    /// Votes the allocation was computed from.
    pub votes: u64,
    /// Seats awarded.
    pub seats: u32,
}

/// Outcome of a D'Hondt run, listed in the input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatAllocation {
    parties: Vec<PartySeats>,
    awards: Vec<PartyId>,
}

impl SeatAllocation {
    /// Seats awarded to `party_id`, or zero when it took no part.
    #[must_use]
    pub fn seats_for(&self, party_id: PartyId) -> u32 {
        self.parties
            .iter()
            .find(|entry| entry.party_id == party_id)
            .map_or(0, |entry| entry.seats)
    }

    /// Per-party results in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, PartySeats> {
        self.parties.iter()
    }

    /// Winner of each round, in the order the seats were handed out.
    ///
    /// Empty when no party had any votes.
    #[must_use]
    pub fn awards(&self) -> &[PartyId] {
        &self.awards
    }

    /// Sum of all awarded seats.
    #[must_use]
    pub fn total_seats(&self) -> u32 {
        self.parties.iter().map(|entry| entry.seats).sum()
    }
}

impl<'a> IntoIterator for &'a SeatAllocation {
    type Item = &'a PartySeats;
    type IntoIter = std::slice::Iter<'a, PartySeats>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
struct Contender {
    position: usize,
    party_id: PartyId,
    votes: u64,
    seats: u32,
}

impl Contender {
    /// `votes / (seats + 1)` strictly greater than `other`'s.
    fn outbids(&self, other: &Self) -> bool {
        let own = u128::from(self.votes) * (u128::from(other.seats) + 1);
        let theirs = u128::from(other.votes) * (u128::from(self.seats) + 1);
        own > theirs
    }
}

/// Distribute `budget` seats over `entries` with the D'Hondt method.
///
/// Each round awards one seat to the party with the largest quotient
/// `votes / (seats + 1)`. Equal quotients go to the party with more votes,
/// then to the one listed first in `entries`. When every party has zero
/// votes no seat is awarded.
///
/// # Examples
/// ```
/// use election_core::{AllocationEntry, PartyId, SeatBudget, allocate_dhondt};
///
/// let a = PartyId::random();
/// let b = PartyId::random();
/// let c = PartyId::random();
/// let budget = SeatBudget::new(7).expect("positive budget");
/// let allocation = allocate_dhondt(
///     &[
///         AllocationEntry::new(a, 100),
///         AllocationEntry::new(b, 80),
///         AllocationEntry::new(c, 30),
///     ],
///     budget,
/// );
/// assert_eq!(allocation.seats_for(a), 3);
/// assert_eq!(allocation.seats_for(b), 3);
/// assert_eq!(allocation.seats_for(c), 1);
/// ```
#[must_use]
pub fn allocate_dhondt(entries: &[AllocationEntry], budget: SeatBudget) -> SeatAllocation {
    let mut contenders: Vec<Contender> = entries
        .iter()
        .enumerate()
        .map(|(position, entry)| Contender {
            position,
            party_id: entry.party_id,
            votes: entry.votes,
            seats: 0,
        })
        .collect();

    let total_votes: u128 = contenders
        .iter()
        .map(|contender| u128::from(contender.votes))
        .sum();
    let mut awards = Vec::new();

    if total_votes > 0 {
        // Stable sort: equal vote counts keep their registration order.
        contenders.sort_by(|left, right| right.votes.cmp(&left.votes));
        for _ in 0..budget.get() {
            let mut winner: Option<&mut Contender> = None;
            for contender in &mut contenders {
                if winner
                    .as_deref()
                    .is_none_or(|leader| contender.outbids(leader))
                {
                    winner = Some(contender);
                }
            }
            if let Some(leader) = winner {
                leader.seats = leader.seats.saturating_add(1);
                awards.push(leader.party_id);
            }
        }
        contenders.sort_by_key(|contender| contender.position);
    }

    SeatAllocation {
        parties: contenders
            .into_iter()
            .map(|contender| PartySeats {
                party_id: contender.party_id,
                votes: contender.votes,
                seats: contender.seats,
            })
            .collect(),
        awards,
    }
}
