//! Party registry: the canonical set of contesting parties.
//!
//! Parties are kept in registration order, which the seat allocator relies on
//! to break ties deterministically. Uniqueness is enforced on the
//! case-insensitive `(name, abbreviation)` pair.

use crate::allocation::SeatAllocation;
use crate::domain::{
    IconChange, IconRef, Party, PartyAbbreviation, PartyId, PartyKey, PartyName, PartyUpdate,
};
use crate::error::ElectionError;

/// Ordered collection of registered parties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyRegistry {
    parties: Vec<Party>,
}

impl PartyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parties: Vec::new(),
        }
    }

    /// Register a new party with zero votes and seats and return a copy of
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::DuplicateParty`] if another party already
    /// uses the same name and abbreviation, ignoring case.
    pub fn add(
        &mut self,
        name: PartyName,
        abbreviation: PartyAbbreviation,
        icon: Option<IconRef>,
    ) -> Result<Party, ElectionError> {
        let key = PartyKey::new(&name, &abbreviation);
        if self.parties.iter().any(|party| party.key() == key) {
            return Err(ElectionError::duplicate_party(name, abbreviation));
        }
        let party = Party::new(PartyId::random(), name, abbreviation, icon);
        self.parties.push(party.clone());
        Ok(party)
    }

    /// Apply an update to an existing party and return the edited copy.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::InvalidParty`] when a replacement field fails
    /// validation, [`ElectionError::PartyNotFound`] when `id` is not
    /// registered and [`ElectionError::DuplicateParty`] when the new
    /// name/abbreviation pair collides with a different party.
    pub fn update(&mut self, id: PartyId, update: PartyUpdate) -> Result<Party, ElectionError> {
        let changes = update.validate()?;
        let current = self
            .get(id)
            .ok_or_else(|| ElectionError::party_not_found(id))?;
        let name = changes.name.unwrap_or_else(|| current.name().clone());
        let abbreviation = changes
            .abbreviation
            .unwrap_or_else(|| current.abbreviation().clone());

        let key = PartyKey::new(&name, &abbreviation);
        let collides = self
            .parties
            .iter()
            .any(|party| party.id() != id && party.key() == key);
        if collides {
            return Err(ElectionError::duplicate_party(name, abbreviation));
        }

        let party = self
            .get_mut(id)
            .ok_or_else(|| ElectionError::party_not_found(id))?;
        party.rename(name, abbreviation);
        match changes.icon {
            IconChange::Keep => {}
            IconChange::Set(icon) => party.set_icon(Some(icon)),
            IconChange::Clear => party.set_icon(None),
        }
        Ok(party.clone())
    }

    /// Remove a party and return it.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::PartyNotFound`] when `id` is not registered.
    pub fn remove(&mut self, id: PartyId) -> Result<Party, ElectionError> {
        let position = self
            .parties
            .iter()
            .position(|party| party.id() == id)
            .ok_or_else(|| ElectionError::party_not_found(id))?;
        Ok(self.parties.remove(position))
    }

    /// Look up a party by identifier.
    #[must_use]
    pub fn get(&self, id: PartyId) -> Option<&Party> {
        self.parties.iter().find(|party| party.id() == id)
    }

    fn get_mut(&mut self, id: PartyId) -> Option<&mut Party> {
        self.parties.iter_mut().find(|party| party.id() == id)
    }

    /// Whether `id` refers to a registered party.
    #[must_use]
    pub fn contains(&self, id: PartyId) -> bool {
        self.get(id).is_some()
    }

    /// Case-insensitive exact lookup by display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Party> {
        let needle = name.trim().to_lowercase();
        self.parties
            .iter()
            .find(|party| party.name().as_ref().to_lowercase() == needle)
    }

    /// Case-insensitive exact lookup by abbreviation.
    #[must_use]
    pub fn find_by_abbreviation(&self, abbreviation: &str) -> Option<&Party> {
        let needle = abbreviation.trim().to_lowercase();
        self.parties
            .iter()
            .find(|party| party.abbreviation().as_ref().to_lowercase() == needle)
    }

    /// Iterate over parties in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Party> {
        self.parties.iter()
    }

    /// Number of registered parties.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.parties.len()
    }

    /// Whether no party is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Sum of the cached vote counts of all parties.
    #[must_use]
    pub fn total_votes(&self) -> u64 {
        self.parties.iter().map(Party::vote_count).sum()
    }

    /// Sum of the seat counts of all parties.
    #[must_use]
    pub fn total_seats(&self) -> u32 {
        self.parties.iter().map(Party::seat_count).sum()
    }

    pub(crate) fn record_vote(&mut self, id: PartyId) -> Result<(), ElectionError> {
        let party = self
            .get_mut(id)
            .ok_or_else(|| ElectionError::unknown_party(id))?;
        party.add_vote();
        Ok(())
    }

    pub(crate) fn apply_allocation(&mut self, allocation: &SeatAllocation) {
        for party in &mut self.parties {
            party.set_seat_count(allocation.seats_for(party.id()));
        }
    }

    pub(crate) fn reset_counts(&mut self) {
        for party in &mut self.parties {
            party.set_vote_count(0);
            party.set_seat_count(0);
        }
    }
}

impl<'a> IntoIterator for &'a PartyRegistry {
    type Item = &'a Party;
    type IntoIter = std::slice::Iter<'a, Party>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
