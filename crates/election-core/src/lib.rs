//! Vote ledger and D'Hondt seat allocation for proportional-representation
//! election simulations.
//!
//! The crate enforces one vote per verified voter, keeps per-party tallies
//! and distributes a fixed seat budget with the D'Hondt highest-averages
//! method. Identity verification, user interfaces and persistence belong to
//! the host; it hands [`ElectionService`] verified voter identifiers and
//! reads back [`ElectionResults`].
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//!
//! use election_core::{
//!     AddPartyRequest, CastVoteRequest, Election, ElectionCommand, ElectionName,
//!     ElectionService, SeatBudget, VoterId,
//! };
//! use mockable::DefaultClock;
//!
//! let election = Election::new(
//!     ElectionName::new("Town Council").expect("valid name"),
//!     SeatBudget::new(3).expect("positive budget"),
//! );
//! let service = ElectionService::new(election, Arc::new(DefaultClock));
//! let party = service
//!     .add_party(AddPartyRequest::new("Green Party", "GRN").expect("valid party"))
//!     .expect("registered");
//! let voter = VoterId::new("NI-0001").expect("valid voter id");
//! service
//!     .cast_vote(CastVoteRequest::new(voter, party.id()))
//!     .expect("vote accepted");
//!
//! let results = service.recalculate_seats().expect("allocated");
//! assert_eq!(results.total_seats, 3);
//! ```

mod macros;

pub mod allocation;
pub mod config;
pub mod domain;
pub mod election;
pub mod error;
pub mod ledger;
pub mod ports;
pub mod registry;
pub mod results;
pub mod service;
pub mod telemetry;

pub use allocation::{AllocationEntry, PartySeats, SeatAllocation, allocate_dhondt};
pub use config::{ElectionSettings, LogFormat, LogFormatParseError};
pub use domain::{
    ElectionName, IconChange, IconRef, Party, PartyAbbreviation, PartyId, PartyName, PartyUpdate,
    PartyValidationError, SeatBudget, Vote, VoterId, VoterIdValidationError, VoterStatus,
};
pub use election::Election;
pub use error::{ElectionError, ElectionErrorCode};
pub use ledger::{AuditTrail, VoteLedger};
pub use ports::{AddPartyRequest, CastVoteRequest, ElectionCommand, ElectionQuery};
pub use registry::PartyRegistry;
pub use results::{AllocationStatus, ElectionResults, PartyResult, PartyTally, VotingActivity};
pub use service::ElectionService;
pub use telemetry::{TelemetryError, init_tracing};
