//! Party data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum allowed length for a party abbreviation.
pub const ABBREVIATION_MAX: usize = 10;

/// Validation errors returned by the party value constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartyValidationError {
    /// The party name is empty once trimmed.
    #[error("party name must not be empty")]
    EmptyName,
    /// The abbreviation is empty once trimmed.
    #[error("party abbreviation must not be empty")]
    EmptyAbbreviation,
    /// The abbreviation exceeds [`ABBREVIATION_MAX`] characters.
    #[error("party abbreviation must be at most {max} characters")]
    AbbreviationTooLong {
        /// Upper bound on abbreviation length.
        max: usize,
    },
}

/// Immutable surrogate identifier assigned when a party is registered.
///
/// Equality and hashing depend only on this value, so renaming a party never
/// changes its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(Uuid);

impl PartyId {
    /// Generate a new random [`PartyId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Display name of a contesting party, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartyName(String);

impl PartyName {
    /// Validate and construct a [`PartyName`].
    ///
    /// # Errors
    ///
    /// Returns [`PartyValidationError::EmptyName`] when the trimmed input is
    /// empty.
    pub fn new(name: impl Into<String>) -> Result<Self, PartyValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, PartyValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PartyValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PartyName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PartyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PartyName> for String {
    fn from(value: PartyName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PartyName {
    type Error = PartyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Short party label of 1 to [`ABBREVIATION_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartyAbbreviation(String);

impl PartyAbbreviation {
    /// Validate and construct a [`PartyAbbreviation`].
    ///
    /// # Errors
    ///
    /// Returns [`PartyValidationError`] when the trimmed input is empty or
    /// longer than [`ABBREVIATION_MAX`] characters.
    pub fn new(abbreviation: impl Into<String>) -> Result<Self, PartyValidationError> {
        Self::from_owned(abbreviation.into())
    }

    fn from_owned(abbreviation: String) -> Result<Self, PartyValidationError> {
        let trimmed = abbreviation.trim();
        if trimmed.is_empty() {
            return Err(PartyValidationError::EmptyAbbreviation);
        }
        if trimmed.chars().count() > ABBREVIATION_MAX {
            return Err(PartyValidationError::AbbreviationTooLong {
                max: ABBREVIATION_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PartyAbbreviation {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PartyAbbreviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PartyAbbreviation> for String {
    fn from(value: PartyAbbreviation) -> Self {
        value.0
    }
}

impl TryFrom<String> for PartyAbbreviation {
    type Error = PartyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Opaque icon reference (path or URL). Never interpreted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(String);

impl IconRef {
    /// Wrap an icon reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}

impl AsRef<str> for IconRef {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Case-insensitive uniqueness key over the `(name, abbreviation)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PartyKey {
    name: String,
    abbreviation: String,
}

impl PartyKey {
    pub(crate) fn new(name: &PartyName, abbreviation: &PartyAbbreviation) -> Self {
        Self {
            name: name.as_ref().to_lowercase(),
            abbreviation: abbreviation.as_ref().to_lowercase(),
        }
    }
}

/// A contesting party with its cached vote tally and last allocated seats.
///
/// ## Invariants
/// - `vote_count` equals the number of ledger entries referencing `id`.
/// - `seat_count` is only meaningful while the owning election reports a
///   current allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    id: PartyId,
    name: PartyName,
    abbreviation: PartyAbbreviation,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<IconRef>,
    vote_count: u64,
    seat_count: u32,
}

impl Party {
    pub(crate) const fn new(
        id: PartyId,
        name: PartyName,
        abbreviation: PartyAbbreviation,
        icon: Option<IconRef>,
    ) -> Self {
        Self {
            id,
            name,
            abbreviation,
            icon,
            vote_count: 0,
            seat_count: 0,
        }
    }

    /// Stable party identifier.
    #[must_use]
    pub const fn id(&self) -> PartyId {
        self.id
    }

    /// Party display name.
    #[must_use]
    pub const fn name(&self) -> &PartyName {
        &self.name
    }

    /// Party abbreviation.
    #[must_use]
    pub const fn abbreviation(&self) -> &PartyAbbreviation {
        &self.abbreviation
    }

    /// Optional icon reference.
    #[must_use]
    pub const fn icon(&self) -> Option<&IconRef> {
        self.icon.as_ref()
    }

    /// Votes received so far.
    #[must_use]
    pub const fn vote_count(&self) -> u64 {
        self.vote_count
    }

    /// Seats awarded by the most recent allocation.
    #[must_use]
    pub const fn seat_count(&self) -> u32 {
        self.seat_count
    }

    pub(crate) fn key(&self) -> PartyKey {
        PartyKey::new(&self.name, &self.abbreviation)
    }

    pub(crate) fn rename(&mut self, name: PartyName, abbreviation: PartyAbbreviation) {
        self.name = name;
        self.abbreviation = abbreviation;
    }

    pub(crate) fn set_icon(&mut self, icon: Option<IconRef>) {
        self.icon = icon;
    }

    pub(crate) const fn add_vote(&mut self) {
        self.vote_count = self.vote_count.saturating_add(1);
    }

    pub(crate) const fn set_vote_count(&mut self, vote_count: u64) {
        self.vote_count = vote_count;
    }

    pub(crate) const fn set_seat_count(&mut self, seat_count: u32) {
        self.seat_count = seat_count;
    }
}

/// Requested changes to a registered party. `None` fields are left as is.
///
/// # Examples
/// ```
/// use election_core::PartyUpdate;
///
/// let update = PartyUpdate::default().with_name("Green Party").clear_icon();
/// assert_eq!(update.name.as_deref(), Some("Green Party"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyUpdate {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement abbreviation.
    pub abbreviation: Option<String>,
    /// Icon change to apply.
    pub icon: IconChange,
}

/// How an update treats the party icon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IconChange {
    /// Leave the current icon untouched.
    #[default]
    Keep,
    /// Replace the icon.
    Set(IconRef),
    /// Remove the icon.
    Clear,
}

impl PartyUpdate {
    /// Request a new display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Request a new abbreviation.
    #[must_use]
    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }

    /// Request a new icon.
    #[must_use]
    pub fn with_icon(mut self, icon: IconRef) -> Self {
        self.icon = IconChange::Set(icon);
        self
    }

    /// Request removal of the icon.
    #[must_use]
    pub fn clear_icon(mut self) -> Self {
        self.icon = IconChange::Clear;
        self
    }

    pub(crate) fn validate(self) -> Result<ValidatedPartyUpdate, PartyValidationError> {
        let name = self.name.map(PartyName::new).transpose()?;
        let abbreviation = self.abbreviation.map(PartyAbbreviation::new).transpose()?;
        Ok(ValidatedPartyUpdate {
            name,
            abbreviation,
            icon: self.icon,
        })
    }
}

/// [`PartyUpdate`] whose text fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedPartyUpdate {
    pub(crate) name: Option<PartyName>,
    pub(crate) abbreviation: Option<PartyAbbreviation>,
    pub(crate) icon: IconChange,
}
