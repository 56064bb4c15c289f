//! End-to-end flows: draft → commit → scoring → aggregation → undo.
//!
//! Exercises the store and the read side together, the way the gateway
//! drives them.

use league_engine::{Catalog, CatalogSnapshot, DraftSession, LeagueStore};
use scoreboard::{event_feed, leaderboard, team_detail, team_score};
use types::action::ScoringAction;
use types::draft::DraftSelection;
use types::identity::Identity;
use types::ids::{ActionId, ParticipantId, UserId};
use types::numeric::{Cost, Points};
use types::participant::Participant;
use uuid::Uuid;

struct League {
    store: LeagueStore,
    participants: Vec<ParticipantId>,
    bonus: ActionId,
    malus: ActionId,
}

fn league(costs: &[u32]) -> League {
    let participants: Vec<Participant> = costs
        .iter()
        .enumerate()
        .map(|(i, c)| Participant::new(format!("Player {}", i), Cost::new(*c)))
        .collect();
    let bonus = ScoringAction::new("bonus", "Bonus", Points::new(20));
    let malus = ScoringAction::new("malus", "Malus", Points::new(-10));
    let ids = participants.iter().map(|p| p.id).collect();
    let (bonus_id, malus_id) = (bonus.id, malus.id);
    let catalog = Catalog::from_snapshot(CatalogSnapshot {
        participants,
        actions: vec![bonus, malus],
    });
    League {
        store: LeagueStore::volatile(catalog),
        participants: ids,
        bonus: bonus_id,
        malus: malus_id,
    }
}

fn owner(name: &str) -> Identity {
    Identity::new(UserId::from_uuid(Uuid::now_v7()), name, false)
}

fn judge() -> Identity {
    Identity::new(UserId::from_uuid(Uuid::now_v7()), "Judge", true)
}

/// Scenario 1: stage 200 + 250 against a fresh 500 budget and commit.
#[test]
fn stage_and_commit_within_budget() {
    let league = league(&[200, 250]);
    let user = owner("Crew");
    let (team, _) = league.store.ensure_team(&user).unwrap();

    let (team_state, committed, prices) = league.store.draft_inputs(team.id).unwrap();
    let mut session = DraftSession::new(team.id, team_state.budget, committed, prices);
    session.toggle(league.participants[0]);
    session.toggle(league.participants[1]);
    assert_eq!(session.draft_cost(), Cost::new(450));
    assert!(session.can_commit());

    let outcome = league
        .store
        .commit_roster(&session.selection(), &user)
        .unwrap();
    assert_eq!(outcome.team.budget.committed, Cost::new(450));
    assert_eq!(outcome.team.budget.remaining(), Cost::new(50));
    assert_eq!(outcome.member_count, 2);
}

/// Scenario 2: a third participant costing 80 no longer fits remaining 50.
#[test]
fn third_pick_over_remaining_budget_is_rejected() {
    let league = league(&[200, 250, 80]);
    let user = owner("Crew");
    let (team, _) = league.store.ensure_team(&user).unwrap();
    league
        .store
        .commit_roster(
            &DraftSelection::with_participants(
                team.id,
                league.participants[..2].iter().copied(),
            ),
            &user,
        )
        .unwrap();

    let (team_state, committed, prices) = league.store.draft_inputs(team.id).unwrap();
    let mut session = DraftSession::new(team.id, team_state.budget, committed, prices);
    session.toggle(league.participants[2]);
    assert!(!session.can_commit());

    // A client that skips the check gets the same answer server-side.
    let err = league
        .store
        .commit_roster(&session.selection(), &user)
        .unwrap_err();
    assert_eq!(err.code(), "OVER_BUDGET");
    assert_eq!(
        league.store.snapshot().unwrap().members_of(team.id).count(),
        2
    );
}

/// Scenario 3: append +20 for a member, aggregate, undo, aggregate again.
#[test]
fn append_then_undo_returns_score_to_zero() {
    let league = league(&[100]);
    let user = owner("Crew");
    let admin = judge();
    let (team, _) = league.store.ensure_team(&user).unwrap();
    league
        .store
        .commit_roster(
            &DraftSelection::with_participants(team.id, [league.participants[0]]),
            &user,
        )
        .unwrap();

    league
        .store
        .append_event(league.participants[0], league.bonus, &admin)
        .unwrap();
    let snapshot = league.store.snapshot().unwrap();
    assert_eq!(team_score(&snapshot, team.id), Points::new(20));

    league.store.undo_last(&admin).unwrap();
    let snapshot = league.store.snapshot().unwrap();
    assert_eq!(team_score(&snapshot, team.id), Points::ZERO);
    assert!(event_feed(&snapshot, 200).is_empty());
}

/// Scenario 4: a malus on a shared participant hits both teams at once.
#[test]
fn shared_participant_malus_hits_both_teams() {
    let league = league(&[100]);
    let user_a = owner("Alpha");
    let user_b = owner("Beta");
    let admin = judge();
    let (team_a, _) = league.store.ensure_team(&user_a).unwrap();
    let (team_b, _) = league.store.ensure_team(&user_b).unwrap();
    for (team, user) in [(team_a.id, &user_a), (team_b.id, &user_b)] {
        league
            .store
            .commit_roster(
                &DraftSelection::with_participants(team, [league.participants[0]]),
                user,
            )
            .unwrap();
    }

    let outcome = league
        .store
        .append_event(league.participants[0], league.malus, &admin)
        .unwrap();
    assert_eq!(outcome.affected_teams.len(), 2);

    let snapshot = league.store.snapshot().unwrap();
    assert_eq!(team_score(&snapshot, team_a.id), Points::new(-10));
    assert_eq!(team_score(&snapshot, team_b.id), Points::new(-10));

    // Both teams count the same single ledger row.
    let rows = leaderboard(&snapshot);
    assert!(rows.iter().all(|r| r.event_count == 1));
}

/// Scenario 5: a full roster admits no seventh member, ever.
#[test]
fn full_roster_admits_no_seventh_member() {
    let league = league(&[10, 10, 10, 10, 10, 10, 10]);
    let user = owner("Crew");
    let (team, _) = league.store.ensure_team(&user).unwrap();
    league
        .store
        .commit_roster(
            &DraftSelection::with_participants(
                team.id,
                league.participants[..6].iter().copied(),
            ),
            &user,
        )
        .unwrap();

    let (team_state, committed, prices) = league.store.draft_inputs(team.id).unwrap();
    let mut session = DraftSession::new(team.id, team_state.budget, committed, prices);
    let seventh = league.participants[6];
    assert!(!session.is_selectable(seventh));
    assert_eq!(
        session.toggle(seventh),
        league_engine::ToggleOutcome::RosterFull
    );
    // Nothing staged, so nothing can ever be persisted past six.
    assert!(!session.can_commit());

    let err = league
        .store
        .commit_roster(
            &DraftSelection::with_participants(team.id, [seventh]),
            &user,
        )
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_FAILED");
    assert_eq!(
        league.store.snapshot().unwrap().members_of(team.id).count(),
        6
    );
}

/// Undo ordering across actors and teams: only the caller's single most
/// recent event is reachable.
#[test]
fn undo_targets_most_recent_event_of_the_caller_only() {
    let league = league(&[100, 100]);
    let user_a = owner("Alpha");
    let user_b = owner("Beta");
    let judge_one = judge();
    let judge_two = judge();
    let (team_a, _) = league.store.ensure_team(&user_a).unwrap();
    let (team_b, _) = league.store.ensure_team(&user_b).unwrap();
    league
        .store
        .commit_roster(
            &DraftSelection::with_participants(team_a.id, [league.participants[0]]),
            &user_a,
        )
        .unwrap();
    league
        .store
        .commit_roster(
            &DraftSelection::with_participants(team_b.id, [league.participants[1]]),
            &user_b,
        )
        .unwrap();

    // judge_one scores team A, judge_two scores team B, judge_one scores
    // team B. judge_one's undo must hit their team-B event, not team A's.
    league
        .store
        .append_event(league.participants[0], league.bonus, &judge_one)
        .unwrap();
    league
        .store
        .append_event(league.participants[1], league.bonus, &judge_two)
        .unwrap();
    league
        .store
        .append_event(league.participants[1], league.malus, &judge_one)
        .unwrap();

    league.store.undo_last(&judge_one).unwrap();
    let snapshot = league.store.snapshot().unwrap();
    assert_eq!(team_score(&snapshot, team_a.id), Points::new(20));
    assert_eq!(team_score(&snapshot, team_b.id), Points::new(20));

    // Second undo reaches judge_one's remaining (older) event.
    league.store.undo_last(&judge_one).unwrap();
    let snapshot = league.store.snapshot().unwrap();
    assert_eq!(team_score(&snapshot, team_a.id), Points::ZERO);

    let err = league.store.undo_last(&judge_one).unwrap_err();
    assert_eq!(err.code(), "NOTHING_TO_UNDO");

    // Detail view reflects the surviving event.
    let detail = team_detail(&snapshot, team_b.id).unwrap();
    assert_eq!(detail.events.len(), 1);
    assert_eq!(detail.score, Points::new(20));
}
