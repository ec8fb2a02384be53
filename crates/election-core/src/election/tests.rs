//! Unit tests for the election aggregate.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;

fn voter(id: &str) -> VoterId {
    VoterId::new(id).expect("valid voter id")
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

struct Scenario {
    election: Election,
    a: PartyId,
    b: PartyId,
    c: PartyId,
}

impl Scenario {
    fn vote_many(&mut self, party: PartyId, prefix: &str, count: u32) {
        for index in 0..count {
            self.election
                .cast_vote(voter(&format!("{prefix}{index}")), party, now())
                .expect("vote accepted");
        }
    }

    fn seats(&self, party: PartyId) -> Option<u32> {
        self.election.parties().get(party).map(Party::seat_count)
    }
}

fn add(election: &mut Election, name: &str, abbreviation: &str) -> PartyId {
    election
        .add_party(
            PartyName::new(name).expect("name"),
            PartyAbbreviation::new(abbreviation).expect("abbreviation"),
            None,
        )
        .expect("party added")
        .id()
}

#[fixture]
fn scenario() -> Scenario {
    let mut election = Election::new(
        ElectionName::new("Test Election").expect("name"),
        SeatBudget::new(7).expect("budget"),
    );
    let a = add(&mut election, "Alpha", "A");
    let b = add(&mut election, "Bravo", "B");
    let c = add(&mut election, "Charlie", "C");
    Scenario { election, a, b, c }
}

fn assert_conserved(election: &Election) {
    assert_eq!(election.parties().total_votes(), election.ledger().total_votes());
    for party in election.parties() {
        assert_eq!(party.vote_count(), election.ledger().votes_for_party(party.id()));
    }
}

#[rstest]
fn dhondt_scenario_allocates_three_three_one(mut scenario: Scenario) {
    let (a, b, c) = (scenario.a, scenario.b, scenario.c);
    scenario.vote_many(a, "a", 100);
    scenario.vote_many(b, "b", 80);
    scenario.vote_many(c, "c", 30);

    let allocation = scenario.election.recalculate_seats();

    assert_eq!(allocation.awards(), [a, b, a, b, a, c, b]);
    assert_eq!(scenario.seats(a), Some(3));
    assert_eq!(scenario.seats(b), Some(3));
    assert_eq!(scenario.seats(c), Some(1));
    assert_eq!(scenario.election.parties().total_seats(), 7);
    assert_conserved(&scenario.election);
}

#[rstest]
fn recalculation_is_idempotent(mut scenario: Scenario) {
    let (a, b) = (scenario.a, scenario.b);
    scenario.vote_many(a, "a", 13);
    scenario.vote_many(b, "b", 8);

    let first = scenario.election.recalculate_seats();
    let second = scenario.election.recalculate_seats();

    assert_eq!(first, second);
}

#[rstest]
fn zero_votes_leave_every_party_seatless(mut scenario: Scenario) {
    scenario
        .election
        .set_seat_budget(SeatBudget::new(10).expect("budget"));

    scenario.election.recalculate_seats();

    assert_eq!(scenario.election.parties().total_seats(), 0);
    assert_eq!(
        scenario.election.allocation_status(),
        AllocationStatus::Current
    );
}

#[rstest]
fn duplicate_vote_leaves_target_party_unchanged(mut scenario: Scenario) {
    let (a, b) = (scenario.a, scenario.b);
    scenario
        .election
        .cast_vote(voter("V1"), a, now())
        .expect("first vote");

    let result = scenario.election.cast_vote(voter("V1"), b, now());

    assert_eq!(result, Err(ElectionError::duplicate_vote(voter("V1"))));
    assert_eq!(scenario.election.parties().get(b).map(Party::vote_count), Some(0));
    assert_conserved(&scenario.election);
}

#[rstest]
fn duplicate_is_reported_before_unknown_party(mut scenario: Scenario) {
    let a = scenario.a;
    scenario
        .election
        .cast_vote(voter("V1"), a, now())
        .expect("first vote");

    let result = scenario
        .election
        .cast_vote(voter("V1"), PartyId::random(), now());

    assert!(matches!(result, Err(ElectionError::DuplicateVote { .. })));
}

#[rstest]
fn unknown_party_is_rejected_without_marking_the_voter(mut scenario: Scenario) {
    let missing = PartyId::random();

    let result = scenario.election.cast_vote(voter("V1"), missing, now());

    assert_eq!(result, Err(ElectionError::unknown_party(missing)));
    assert_eq!(
        scenario.election.voter_status(&voter("V1")),
        VoterStatus::NotVoted
    );
    assert!(scenario.election.all_votes().is_empty());
}

#[rstest]
fn removing_a_party_cascades_only_its_votes(mut scenario: Scenario) {
    let (a, b, c) = (scenario.a, scenario.b, scenario.c);
    scenario.vote_many(a, "a", 100);
    scenario.vote_many(b, "b", 80);
    scenario.vote_many(c, "c", 30);
    scenario.election.recalculate_seats();

    let removed = scenario.election.remove_party(b).expect("remove bravo");

    assert_eq!(removed.vote_count(), 80);
    assert_eq!(scenario.election.ledger().total_votes(), 130);
    assert!(
        scenario
            .election
            .all_votes()
            .iter()
            .all(|vote| vote.party_id() != b)
    );
    assert_eq!(scenario.election.allocation_status(), AllocationStatus::Stale);
    assert_eq!(
        scenario.election.voter_status(&voter("b0")),
        VoterStatus::Voted
    );
    assert_conserved(&scenario.election);

    scenario.election.recalculate_seats();
    assert_eq!(scenario.seats(a), Some(6));
    assert_eq!(scenario.seats(c), Some(1));
}

#[rstest]
fn removing_a_missing_party_fails(mut scenario: Scenario) {
    let missing = PartyId::random();
    assert_eq!(
        scenario.election.remove_party(missing),
        Err(ElectionError::party_not_found(missing))
    );
}

#[rstest]
fn reset_clears_votes_and_voters_but_keeps_parties(mut scenario: Scenario) {
    let (a, b) = (scenario.a, scenario.b);
    scenario.vote_many(a, "a", 5);
    scenario.vote_many(b, "b", 3);
    scenario.election.recalculate_seats();

    scenario.election.reset();
    scenario.election.recalculate_seats();

    assert_eq!(scenario.election.parties().len(), 3);
    assert_eq!(scenario.election.parties().total_seats(), 0);
    assert_eq!(scenario.election.ledger().total_votes(), 0);
    assert_eq!(
        scenario.election.voter_status(&voter("a0")),
        VoterStatus::NotVoted
    );
    assert_eq!(scenario.election.seat_budget().get(), 7);
}

#[rstest]
fn reset_returns_status_to_not_calculated(mut scenario: Scenario) {
    scenario.election.recalculate_seats();
    scenario.election.reset();
    assert_eq!(
        scenario.election.allocation_status(),
        AllocationStatus::NotCalculated
    );
}

#[rstest]
fn status_goes_stale_after_votes_and_budget_changes(mut scenario: Scenario) {
    let a = scenario.a;
    assert_eq!(
        scenario.election.allocation_status(),
        AllocationStatus::NotCalculated
    );
    scenario.vote_many(a, "a", 1);
    assert_eq!(
        scenario.election.allocation_status(),
        AllocationStatus::NotCalculated
    );

    scenario.election.recalculate_seats();
    scenario
        .election
        .set_seat_budget(SeatBudget::new(7).expect("same budget"));
    assert_eq!(
        scenario.election.allocation_status(),
        AllocationStatus::Current
    );

    scenario
        .election
        .set_seat_budget(SeatBudget::new(9).expect("budget"));
    assert_eq!(scenario.election.allocation_status(), AllocationStatus::Stale);
}

#[rstest]
fn renaming_a_party_keeps_the_allocation_current(mut scenario: Scenario) {
    let a = scenario.a;
    scenario.vote_many(a, "a", 2);
    scenario.election.recalculate_seats();

    scenario
        .election
        .update_party(a, PartyUpdate::default().with_name("Alpha Renewed"))
        .expect("rename");

    assert_eq!(
        scenario.election.allocation_status(),
        AllocationStatus::Current
    );
    assert_eq!(scenario.seats(a), Some(7));
}

#[rstest]
fn results_are_ordered_by_votes_then_registration(mut scenario: Scenario) {
    let (a, b, c) = (scenario.a, scenario.b, scenario.c);
    scenario.vote_many(c, "c", 4);
    scenario.vote_many(b, "b", 1);
    scenario.vote_many(a, "a", 1);
    scenario.election.recalculate_seats();

    let results = scenario.election.results();

    let order: Vec<PartyId> = results.parties.iter().map(|row| row.party_id).collect();
    assert_eq!(order, [c, a, b]);
    assert_eq!(results.total_votes, 6);
    assert_eq!(results.total_seats, 7);
    assert_eq!(results.election_name, "Test Election");
    let top = results.party(c).expect("charlie row");
    assert_eq!(top.vote_count, 4);
}

#[rstest]
fn voting_activity_lists_recent_votes_newest_first(mut scenario: Scenario) {
    let (a, b) = (scenario.a, scenario.b);
    scenario.vote_many(a, "a", 2);
    scenario.vote_many(b, "b", 1);

    let activity = scenario.election.voting_activity(2);

    assert_eq!(activity.total_votes, 3);
    let recent: Vec<&str> = activity
        .recent_votes
        .iter()
        .map(|vote| vote.voter_id().as_ref())
        .collect();
    assert_eq!(recent, ["b0", "a1"]);
    let tallies: Vec<u64> = activity.tallies.iter().map(|tally| tally.vote_count).collect();
    assert_eq!(tallies, [2, 1, 0]);
}

#[rstest]
fn rename_replaces_the_display_name(mut scenario: Scenario) {
    scenario
        .election
        .rename(ElectionName::new("Local Council").expect("name"));
    assert_eq!(scenario.election.name().as_ref(), "Local Council");
}

#[derive(Debug, Clone)]
enum Step {
    Ballot { voter: u8, party: usize },
    Register,
    Withdraw { party: usize },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0_u8..40, 0_usize..6).prop_map(|(voter, party)| Step::Ballot { voter, party }),
        1 => Just(Step::Register),
        1 => (0_usize..6).prop_map(|party| Step::Withdraw { party }),
    ]
}

proptest! {
    #[test]
    fn tallies_stay_conserved_through_votes_and_removals(
        steps in proptest::collection::vec(step(), 0..80),
    ) {
        let mut election = Election::new(
            ElectionName::new("Property Election").expect("name"),
            SeatBudget::new(5).expect("budget"),
        );
        let mut live: Vec<PartyId> = Vec::new();
        let mut registered = 0_u32;

        for next in steps {
            match next {
                Step::Ballot { voter: number, party } => {
                    let id = voter(&format!("V{number}"));
                    let already_voted = election.voter_status(&id) == VoterStatus::Voted;
                    let target = live.get(party).copied();
                    let outcome =
                        election.cast_vote(id.clone(), target.unwrap_or_else(PartyId::random), now());
                    match (already_voted, target) {
                        (true, _) => {
                            prop_assert_eq!(outcome, Err(ElectionError::duplicate_vote(id)));
                        }
                        (false, None) => {
                            let unknown = matches!(outcome, Err(ElectionError::UnknownParty { .. }));
                            prop_assert!(unknown);
                        }
                        (false, Some(_)) => {
                            prop_assert!(outcome.is_ok());
                        }
                    }
                }
                Step::Register => {
                    registered += 1;
                    let name = format!("Party {registered}");
                    let abbreviation = format!("P{registered}");
                    live.push(add(&mut election, &name, &abbreviation));
                }
                Step::Withdraw { party } if party < live.len() => {
                    let id = live.remove(party);
                    let before = election.ledger().total_votes();
                    let removed = election.remove_party(id).expect("live party");
                    prop_assert_eq!(election.ledger().total_votes(), before - removed.vote_count());
                    prop_assert!(election.ledger().iter().all(|vote| vote.party_id() != id));
                }
                Step::Withdraw { .. } => {}
            }
            assert_conserved(&election);
        }

        election.recalculate_seats();
        let expected_seats = if election.ledger().total_votes() == 0 { 0 } else { 5 };
        prop_assert_eq!(election.parties().total_seats(), expected_seats);
    }
}
