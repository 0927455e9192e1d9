//! Behavioral tests for the rating and prediction scoring engine. These run
//! against the pure engine API; nothing here needs a database.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use prode_backend::engine::aggregator::{self, PlayerStanding};
use prode_backend::engine::lifecycle::{self, ClosureTally, SideOutcome};
use prode_backend::engine::scoring::{score, AwardCategory};
use prode_backend::models::amateur_match::{MatchPlayer, MatchState, TeamSide};

fn roster_player(id: u128, team: TeamSide, user: Option<u128>) -> MatchPlayer {
    MatchPlayer {
        id: Uuid::from_u128(id),
        match_id: Uuid::from_u128(1000),
        user_id: user.map(Uuid::from_u128),
        display_name: format!("Player {}", id),
        team,
        position_slot: id as i32,
        goals: None,
        assists: None,
        created_at: Utc.timestamp_opt(id as i64, 0).unwrap(),
    }
}

#[test]
fn scoring_rules_match_the_published_table() {
    let cases = [
        // (predicted, actual, points, category)
        ((0, 0), (0, 0), 8, AwardCategory::Exact),
        ((2, 1), (2, 1), 8, AwardCategory::Exact),
        ((2, 1), (3, 2), 5, AwardCategory::WinnerAndDiff),
        ((1, 1), (2, 2), 5, AwardCategory::WinnerAndDiff),
        ((2, 0), (1, 0), 3, AwardCategory::WinnerOnly),
        ((0, 1), (1, 3), 3, AwardCategory::WinnerOnly),
        ((1, 1), (2, 0), 0, AwardCategory::None),
        ((3, 0), (0, 3), 0, AwardCategory::None),
    ];

    for ((ph, pa), (ah, aa), points, category) in cases {
        let award = score(ph, pa, ah, aa);
        assert_eq!(
            (award.points, award.category),
            (points, category),
            "score({}, {}, {}, {})",
            ph,
            pa,
            ah,
            aa
        );
    }
}

#[test]
fn scoring_is_deterministic() {
    for _ in 0..3 {
        assert_eq!(score(2, 1, 3, 2), score(2, 1, 3, 2));
    }
}

#[test]
fn aggregation_handles_empty_and_typical_vote_lists() {
    let empty = aggregator::aggregate(&[]);
    assert_eq!(empty.average, 0.0);
    assert_eq!(empty.vote_count, 0);
    assert!(empty.distribution.iter().all(|&n| n == 0));

    let rated = aggregator::aggregate(&[8, 6, 10]);
    assert_eq!(rated.average, 8.0);
    assert_eq!(rated.vote_count, 3);
    assert_eq!(rated.distribution[7], 1);
    assert_eq!(rated.distribution[5], 1);
    assert_eq!(rated.distribution[9], 1);
}

#[test]
fn ranking_never_crowns_an_unrated_player() {
    let entries = vec![
        PlayerStanding {
            player_id: Uuid::from_u128(1),
            summary: aggregator::aggregate(&[]),
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
        },
        PlayerStanding {
            player_id: Uuid::from_u128(2),
            summary: aggregator::aggregate(&[4]),
            created_at: Utc.timestamp_opt(1, 0).unwrap(),
        },
    ];

    // Even a poorly rated player beats an unrated one
    let ranked = aggregator::rank(entries.clone());
    assert_eq!(ranked[0].player_id, Uuid::from_u128(2));
    assert_eq!(aggregator::mvp(&entries).unwrap().player_id, Uuid::from_u128(2));

    let unrated_only = vec![entries[0].clone()];
    assert!(aggregator::mvp(&unrated_only).is_none());
}

#[test]
fn closure_derives_final_score_from_goal_tallies() {
    let roster = vec![
        roster_player(1, TeamSide::Blue, Some(101)),
        roster_player(2, TeamSide::Blue, None),
        roster_player(3, TeamSide::Red, Some(103)),
    ];
    let mut tallies = HashMap::new();
    tallies.insert(Uuid::from_u128(1), ClosureTally { goals: 2, assists: 1 });
    tallies.insert(Uuid::from_u128(2), ClosureTally { goals: 1, assists: 0 });
    tallies.insert(Uuid::from_u128(3), ClosureTally { goals: 1, assists: 0 });

    let (blue, red) = lifecycle::final_scores(&roster, &tallies);
    assert_eq!((blue, red), (3, 1));

    // Blue won, red lost: streak stepping per side
    assert_eq!(lifecycle::side_outcome(blue, red), SideOutcome::Won);
    assert_eq!(lifecycle::side_outcome(red, blue), SideOutcome::Lost);
    assert_eq!(lifecycle::next_streak(2, SideOutcome::Won), Some(3));
    assert_eq!(lifecycle::next_streak(2, SideOutcome::Lost), Some(0));
}

#[test]
fn finalized_is_terminal() {
    assert!(!lifecycle::can_transition(
        MatchState::Finalized,
        MatchState::VotingOpen
    ));
    assert!(!lifecycle::can_transition(
        MatchState::Finalized,
        MatchState::Draft
    ));
    assert!(!lifecycle::can_transition(
        MatchState::Draft,
        MatchState::Finalized
    ));
}

#[test]
fn team_average_ignores_unrated_players_entirely() {
    let summaries = vec![
        aggregator::aggregate(&[9, 7]), // 8.0
        aggregator::aggregate(&[6]),    // 6.0
        aggregator::aggregate(&[]),     // unrated, excluded
    ];
    assert_eq!(aggregator::team_average(&summaries), 7.0);
}
