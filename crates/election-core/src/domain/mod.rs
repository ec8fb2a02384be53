//! Domain primitives for the election core.
//!
//! Purpose: strongly typed identities and value objects shared by the party
//! registry, vote ledger, allocator and election aggregate. Constructors
//! validate their input so the aggregate only ever holds well-formed values.
//!
//! Public surface:
//! - `Party`, `PartyId`, `PartyName`, `PartyAbbreviation`, `IconRef` and
//!   the `PartyUpdate` request used to edit a registered party.
//! - `VoterId` and `VoterStatus` for the per-voter voting state.
//! - `Vote`, the immutable ledger record.
//! - `SeatBudget` and `ElectionName`, the election-wide parameters.

mod election_params;
mod party;
mod vote;
mod voter;

pub use self::election_params::{ElectionName, SeatBudget};
pub(crate) use self::party::PartyKey;
pub use self::party::{
    ABBREVIATION_MAX, IconChange, IconRef, Party, PartyAbbreviation, PartyId, PartyName,
    PartyUpdate, PartyValidationError,
};
pub use self::vote::Vote;
pub use self::voter::{VoterId, VoterIdValidationError, VoterStatus};
