//! Driving ports for the election core.
//!
//! Inbound adapters (identity verification, party administration and
//! reporting front ends) depend on these traits rather than on the service
//! type, so they can be exercised against in-memory doubles.

mod election_command;
mod election_query;

pub use election_command::{AddPartyRequest, CastVoteRequest, ElectionCommand};
pub use election_query::ElectionQuery;
