use std::collections::HashMap;
use uuid::Uuid;

use crate::models::amateur_match::{MatchPlayer, MatchState, TeamSide};

/// Outcome of a match from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideOutcome {
    Won,
    Lost,
    Drew,
}

/// Per-player closure entry: goals and assists recorded when the match is
/// finalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosureTally {
    pub goals: i32,
    pub assists: i32,
}

/// Whether a match may move from `from` to `to`. The machine is strictly
/// one-way and `Draft -> Finalized` must pass through the voting window.
pub fn can_transition(from: MatchState, to: MatchState) -> bool {
    matches!(
        (from, to),
        (MatchState::Draft, MatchState::VotingOpen)
            | (MatchState::VotingOpen, MatchState::Finalized)
    )
}

/// Derive each side's final score as the sum of the per-player goal entries
/// for that side. The stored final score is never set independently of this
/// sum. Players missing from the tally map count as zero goals.
pub fn final_scores(
    roster: &[MatchPlayer],
    tallies: &HashMap<Uuid, ClosureTally>,
) -> (i32, i32) {
    let mut blue = 0;
    let mut red = 0;
    for player in roster {
        let goals = tallies.get(&player.id).map(|t| t.goals).unwrap_or(0);
        match player.team {
            TeamSide::Blue => blue += goals,
            TeamSide::Red => red += goals,
        }
    }
    (blue, red)
}

pub fn side_outcome(scored: i32, conceded: i32) -> SideOutcome {
    if scored > conceded {
        SideOutcome::Won
    } else if scored < conceded {
        SideOutcome::Lost
    } else {
        SideOutcome::Drew
    }
}

/// Step a user's running win streak: wins extend it, losses reset it, draws
/// leave it untouched. Returns the new value, or None when no write is
/// needed.
pub fn next_streak(current: i32, outcome: SideOutcome) -> Option<i32> {
    match outcome {
        SideOutcome::Won => Some(current + 1),
        SideOutcome::Lost => Some(0),
        SideOutcome::Drew => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::amateur_match::MatchFormat;
    use chrono::Utc;

    fn player(id: u128, team: TeamSide) -> MatchPlayer {
        MatchPlayer {
            id: Uuid::from_u128(id),
            match_id: Uuid::from_u128(99),
            user_id: None,
            display_name: format!("player-{}", id),
            team,
            position_slot: id as i32,
            goals: None,
            assists: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn state_machine_is_one_way() {
        use MatchState::*;
        assert!(can_transition(Draft, VotingOpen));
        assert!(can_transition(VotingOpen, Finalized));

        assert!(!can_transition(Draft, Finalized));
        assert!(!can_transition(VotingOpen, Draft));
        assert!(!can_transition(Finalized, VotingOpen));
        assert!(!can_transition(Finalized, Draft));
        assert!(!can_transition(Finalized, Finalized));
    }

    #[test]
    fn final_score_is_sum_of_side_goal_tallies() {
        let roster = vec![
            player(1, TeamSide::Blue),
            player(2, TeamSide::Blue),
            player(3, TeamSide::Red),
        ];
        let mut tallies = HashMap::new();
        tallies.insert(
            Uuid::from_u128(1),
            ClosureTally {
                goals: 2,
                assists: 0,
            },
        );
        tallies.insert(
            Uuid::from_u128(2),
            ClosureTally {
                goals: 1,
                assists: 1,
            },
        );
        tallies.insert(
            Uuid::from_u128(3),
            ClosureTally {
                goals: 1,
                assists: 0,
            },
        );

        assert_eq!(final_scores(&roster, &tallies), (3, 1));
    }

    #[test]
    fn players_without_a_tally_entry_score_zero() {
        let roster = vec![player(1, TeamSide::Blue), player(2, TeamSide::Red)];
        assert_eq!(final_scores(&roster, &HashMap::new()), (0, 0));
    }

    #[test]
    fn streaks_grow_on_wins_reset_on_losses_hold_on_draws() {
        assert_eq!(next_streak(3, SideOutcome::Won), Some(4));
        assert_eq!(next_streak(3, SideOutcome::Lost), Some(0));
        assert_eq!(next_streak(3, SideOutcome::Drew), None);
        assert_eq!(next_streak(0, SideOutcome::Won), Some(1));
    }

    #[test]
    fn format_team_sizes() {
        assert_eq!(MatchFormat::Five.team_size(), 5);
        assert_eq!(MatchFormat::Seven.team_size(), 7);
        assert_eq!(MatchFormat::Eight.team_size(), 8);
        assert_eq!(MatchFormat::Nine.team_size(), 9);
        assert_eq!(MatchFormat::Eleven.team_size(), 11);
    }

    #[test]
    fn side_outcomes() {
        assert_eq!(side_outcome(3, 1), SideOutcome::Won);
        assert_eq!(side_outcome(1, 3), SideOutcome::Lost);
        assert_eq!(side_outcome(2, 2), SideOutcome::Drew);
    }
}
