use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Aggregated vote figures for one player.
///
/// `average` is 0.0 when there are no votes; the ranking functions treat a
/// zero-vote player as "unrated" rather than "rated 0".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub vote_count: u32,
    /// Count of votes per rating, index 0 holds rating 1.
    pub distribution: [u32; 10],
}

impl RatingSummary {
    pub fn empty() -> Self {
        Self {
            average: 0.0,
            vote_count: 0,
            distribution: [0; 10],
        }
    }
}

/// A player with its aggregate, ready for ranking. `created_at` is the
/// roster insertion time, used as the final tie-break so the crowned MVP is
/// deterministic.
#[derive(Debug, Clone)]
pub struct PlayerStanding {
    pub player_id: Uuid,
    pub summary: RatingSummary,
    pub created_at: DateTime<Utc>,
}

/// Reduce a list of ratings (each 1..=10) into a summary.
/// Total on any input; never divides by zero.
pub fn aggregate(ratings: &[i32]) -> RatingSummary {
    if ratings.is_empty() {
        return RatingSummary::empty();
    }

    let mut distribution = [0u32; 10];
    let mut sum: i64 = 0;
    for &rating in ratings {
        sum += rating as i64;
        if (1..=10).contains(&rating) {
            distribution[(rating - 1) as usize] += 1;
        }
    }

    let mean = sum as f64 / ratings.len() as f64;

    RatingSummary {
        average: round_to_tenth(mean),
        vote_count: ratings.len() as u32,
        distribution,
    }
}

/// Round to one decimal place, half away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sort players for display: average descending, zero-vote players last.
/// Equal averages prefer the player with more votes, then roster insertion
/// order.
pub fn rank(mut entries: Vec<PlayerStanding>) -> Vec<PlayerStanding> {
    entries.sort_by(compare_standings);
    entries
}

fn compare_standings(a: &PlayerStanding, b: &PlayerStanding) -> Ordering {
    // Unrated players sort after everyone with at least one vote
    match (a.summary.vote_count == 0, b.summary.vote_count == 0) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }
    b.summary
        .average
        .partial_cmp(&a.summary.average)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.summary.vote_count.cmp(&a.summary.vote_count))
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// The match MVP: the top-ranked player, strictly requiring at least one
/// vote. With no votes cast at all there is no MVP to crown.
pub fn mvp(entries: &[PlayerStanding]) -> Option<&PlayerStanding> {
    entries
        .iter()
        .filter(|e| e.summary.vote_count > 0)
        .min_by(|a, b| compare_standings(a, b))
}

/// Mean of player averages over players that actually received votes.
/// Unrated players are excluded from the denominator; 0.0 when no player on
/// the team has votes.
pub fn team_average(summaries: &[RatingSummary]) -> f64 {
    let rated: Vec<&RatingSummary> = summaries.iter().filter(|s| s.vote_count > 0).collect();
    if rated.is_empty() {
        return 0.0;
    }
    let sum: f64 = rated.iter().map(|s| s.average).sum();
    round_to_tenth(sum / rated.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn standing(id: u128, ratings: &[i32], created_secs: i64) -> PlayerStanding {
        PlayerStanding {
            player_id: Uuid::from_u128(id),
            summary: aggregate(ratings),
            created_at: Utc.timestamp_opt(created_secs, 0).unwrap(),
        }
    }

    #[test]
    fn empty_vote_list_yields_zeroed_summary() {
        let summary = aggregate(&[]);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.vote_count, 0);
        assert_eq!(summary.distribution, [0; 10]);
    }

    #[test]
    fn aggregate_computes_mean_and_buckets() {
        let summary = aggregate(&[8, 6, 10]);
        assert_eq!(summary.average, 8.0);
        assert_eq!(summary.vote_count, 3);
        assert_eq!(summary.distribution[5], 1); // rating 6
        assert_eq!(summary.distribution[7], 1); // rating 8
        assert_eq!(summary.distribution[9], 1); // rating 10
        assert_eq!(summary.distribution.iter().sum::<u32>(), 3);
    }

    #[test]
    fn average_rounds_half_away_from_zero() {
        assert_eq!(aggregate(&[7, 8]).average, 7.5);
        // 7.25 rounds to 7.3, not 7.2
        assert_eq!(aggregate(&[7, 7, 7, 8]).average, 7.3);
    }

    #[test]
    fn unrated_players_rank_last() {
        let ranked = rank(vec![
            standing(1, &[], 0),
            standing(2, &[3], 10),
            standing(3, &[9], 20),
        ]);
        let order: Vec<u128> = ranked.iter().map(|s| s.player_id.as_u128()).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn mvp_requires_at_least_one_vote() {
        let entries = vec![standing(1, &[], 0), standing(2, &[], 10)];
        assert!(mvp(&entries).is_none());
    }

    #[test]
    fn mvp_tie_breaks_on_vote_count_then_creation_order() {
        // Same 8.0 average, second player has more votes
        let entries = vec![standing(1, &[8], 0), standing(2, &[8, 8], 10)];
        assert_eq!(mvp(&entries).unwrap().player_id, Uuid::from_u128(2));

        // Fully tied: earlier roster entry wins
        let entries = vec![standing(2, &[7], 10), standing(1, &[7], 0)];
        assert_eq!(mvp(&entries).unwrap().player_id, Uuid::from_u128(1));
    }

    #[test]
    fn team_average_skips_unrated_players() {
        let summaries = vec![aggregate(&[8]), aggregate(&[6]), aggregate(&[])];
        assert_eq!(team_average(&summaries), 7.0);
    }

    #[test]
    fn team_average_is_zero_without_rated_players() {
        assert_eq!(team_average(&[aggregate(&[]), aggregate(&[])]), 0.0);
        assert_eq!(team_average(&[]), 0.0);
    }
}
