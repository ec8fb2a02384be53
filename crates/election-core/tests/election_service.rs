//! End-to-end tests driving the service through its ports.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;
use std::thread;

use election_core::{
    AddPartyRequest, AllocationStatus, CastVoteRequest, ElectionCommand, ElectionErrorCode,
    ElectionQuery, ElectionService, ElectionSettings, PartyId, VoterId,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Harness {
    service: Arc<ElectionService>,
    parties: Vec<PartyId>,
}

#[fixture]
fn harness() -> Harness {
    let settings = ElectionSettings {
        name: Some("Integration Election".to_owned()),
        seat_budget: 7,
        log_format: None,
    };
    let service = Arc::new(
        ElectionService::from_settings(&settings, Arc::new(DefaultClock)).expect("service"),
    );
    let parties = [("Alpha", "A"), ("Bravo", "B"), ("Charlie", "C")]
        .into_iter()
        .map(|(name, abbreviation)| {
            service
                .add_party(AddPartyRequest::new(name, abbreviation).expect("valid party"))
                .expect("registered")
                .id()
        })
        .collect();
    Harness { service, parties }
}

fn command(service: &Arc<ElectionService>) -> Arc<dyn ElectionCommand> {
    Arc::clone(service) as Arc<dyn ElectionCommand>
}

fn query(service: &Arc<ElectionService>) -> Arc<dyn ElectionQuery> {
    Arc::clone(service) as Arc<dyn ElectionQuery>
}

#[rstest]
fn parallel_voters_are_all_counted(harness: Harness) {
    let Harness { service, parties } = harness;
    let workers: Vec<_> = parties
        .iter()
        .copied()
        .enumerate()
        .map(|(worker, party)| {
            let commands = command(&service);
            thread::spawn(move || {
                for ballot in 0..50 {
                    let voter = VoterId::new(format!("W{worker}-{ballot}")).expect("voter id");
                    commands
                        .cast_vote(CastVoteRequest::new(voter, party))
                        .expect("unique voter accepted");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker thread");
    }

    let results = query(&service).results().expect("results");
    assert_eq!(results.total_votes, 150);
    assert!(results.parties.iter().all(|row| row.vote_count == 50));
}

#[rstest]
fn audit_trail_survives_later_mutations(harness: Harness) {
    let Harness { service, parties } = harness;
    let party = *parties.first().expect("first party");
    service
        .cast_vote(CastVoteRequest::new(VoterId::new("V1").expect("id"), party))
        .expect("vote");

    let trail = service.all_votes().expect("trail");
    service.reset_election().expect("reset");

    let reader = thread::spawn(move || trail.iter().count());
    assert_eq!(reader.join().expect("reader thread"), 1);
    assert!(service.all_votes().expect("trail").is_empty());
}

#[rstest]
fn results_serialize_as_camel_case_json(harness: Harness) {
    let Harness { service, parties } = harness;
    let party = *parties.first().expect("first party");
    service
        .cast_vote(CastVoteRequest::new(VoterId::new("V1").expect("id"), party))
        .expect("vote");

    let results = service.recalculate_seats().expect("recalculate");
    let rendered: Value =
        serde_json::from_str(&results.to_json_pretty().expect("json")).expect("valid json");

    assert_eq!(rendered["electionName"], json!("Integration Election"));
    assert_eq!(rendered["status"], json!("current"));
    assert_eq!(rendered["totalSeats"], json!(7));
    assert_eq!(rendered["parties"][0]["partyName"], json!("Alpha"));
    assert_eq!(rendered["parties"][0]["seatCount"], json!(7));
    assert_eq!(rendered["parties"][0]["votePercentage"], json!(100.0));
}

#[rstest]
fn cast_vote_request_deserializes_from_camel_case(harness: Harness) {
    let Harness { service, parties } = harness;
    let party = *parties.get(1).expect("second party");
    let payload = json!({ "voterId": "NI-42", "partyId": party });

    let request: CastVoteRequest = serde_json::from_value(payload).expect("request");
    service.cast_vote(request).expect("vote");

    let activity = service.voting_activity(10).expect("activity");
    assert_eq!(activity.total_votes, 1);
    assert_eq!(
        activity
            .recent_votes
            .first()
            .map(|vote| vote.voter_id().as_ref()),
        Some("NI-42")
    );
}

#[rstest]
fn invalid_voter_ids_are_rejected_at_the_boundary() {
    let payload = json!({ "voterId": " padded ", "partyId": PartyId::random() });
    assert!(serde_json::from_value::<CastVoteRequest>(payload).is_err());
}

#[rstest]
fn error_codes_are_stable_for_adapters(harness: Harness) {
    let Harness { service, parties } = harness;
    let party = *parties.first().expect("first party");
    let voter = VoterId::new("V1").expect("id");
    service
        .cast_vote(CastVoteRequest::new(voter.clone(), party))
        .expect("vote");

    let duplicate = service
        .cast_vote(CastVoteRequest::new(voter, party))
        .expect_err("duplicate");
    let duplicate_party = service
        .add_party(AddPartyRequest::new("alpha", "a").expect("valid party"))
        .expect_err("duplicate party");
    let budget = service.set_seat_budget(0).expect_err("invalid budget");

    assert_eq!(duplicate.code(), ElectionErrorCode::DuplicateVote);
    assert_eq!(duplicate_party.code(), ElectionErrorCode::DuplicateParty);
    assert_eq!(budget.code(), ElectionErrorCode::InvalidSeatBudget);
}

#[rstest]
fn removal_marks_allocation_stale_until_recalculated(harness: Harness) {
    let Harness { service, parties } = harness;
    let [alpha, bravo, _] = parties.as_slice() else {
        panic!("three parties expected");
    };
    for (index, party) in [*alpha, *alpha, *bravo].into_iter().enumerate() {
        let voter = VoterId::new(format!("V{index}")).expect("id");
        service
            .cast_vote(CastVoteRequest::new(voter, party))
            .expect("vote");
    }
    service.recalculate_seats().expect("recalculate");

    service.remove_party(*bravo).expect("remove");
    assert_eq!(
        service.results().expect("results").status,
        AllocationStatus::Stale
    );

    let results = service.recalculate_seats().expect("recalculate");
    assert_eq!(results.status, AllocationStatus::Current);
    assert_eq!(results.party(*alpha).map(|row| row.seat_count), Some(7));
    assert_eq!(results.total_votes, 2);
}
