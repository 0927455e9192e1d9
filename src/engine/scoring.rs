use serde::{Deserialize, Serialize};

/// How a scored prediction was awarded its points.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AwardCategory {
    Exact,
    WinnerAndDiff,
    WinnerOnly,
    None,
}

impl AwardCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AwardCategory::Exact => "exact",
            AwardCategory::WinnerAndDiff => "winner_and_diff",
            AwardCategory::WinnerOnly => "winner_only",
            AwardCategory::None => "none",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ScoreAward {
    pub points: i32,
    pub category: AwardCategory,
}

/// Score a predicted scoreline against the actual result.
///
/// Rules are evaluated in fixed priority order, first match wins:
/// 1. exact scoreline -> 8 points
/// 2. same outcome and same goal differential -> 5 points
/// 3. same outcome only -> 3 points
/// 4. otherwise -> 0 points
///
/// This is the single implementation shared by the contest scorer and the
/// interactive simulator. A 0-0 prediction against a 0-0 result is `Exact`,
/// not `WinnerAndDiff`.
pub fn score(
    predicted_home: i32,
    predicted_away: i32,
    actual_home: i32,
    actual_away: i32,
) -> ScoreAward {
    if predicted_home == actual_home && predicted_away == actual_away {
        return ScoreAward {
            points: 8,
            category: AwardCategory::Exact,
        };
    }

    let predicted_diff = predicted_home - predicted_away;
    let actual_diff = actual_home - actual_away;
    let same_outcome = predicted_diff.signum() == actual_diff.signum();

    if same_outcome {
        if predicted_diff == actual_diff {
            return ScoreAward {
                points: 5,
                category: AwardCategory::WinnerAndDiff,
            };
        }
        return ScoreAward {
            points: 3,
            category: AwardCategory::WinnerOnly,
        };
    }

    ScoreAward {
        points: 0,
        category: AwardCategory::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_scoreline_awards_eight() {
        let award = score(2, 1, 2, 1);
        assert_eq!(award.points, 8);
        assert_eq!(award.category, AwardCategory::Exact);
    }

    #[test]
    fn goalless_draw_is_exact_not_winner_and_diff() {
        let award = score(0, 0, 0, 0);
        assert_eq!(award.points, 8);
        assert_eq!(award.category, AwardCategory::Exact);
    }

    #[test]
    fn same_winner_and_differential_awards_five() {
        let award = score(2, 1, 3, 2);
        assert_eq!(award.points, 5);
        assert_eq!(award.category, AwardCategory::WinnerAndDiff);
    }

    #[test]
    fn same_winner_only_awards_three() {
        let award = score(2, 0, 1, 0);
        assert_eq!(award.points, 3);
        assert_eq!(award.category, AwardCategory::WinnerOnly);
    }

    #[test]
    fn predicted_draw_actual_win_awards_nothing() {
        let award = score(1, 1, 2, 0);
        assert_eq!(award.points, 0);
        assert_eq!(award.category, AwardCategory::None);
    }

    #[test]
    fn nonzero_draw_with_same_diff_is_winner_and_diff() {
        // 1-1 predicted, 2-2 actual: both draws, diff 0 both, but not exact
        let award = score(1, 1, 2, 2);
        assert_eq!(award.points, 5);
        assert_eq!(award.category, AwardCategory::WinnerAndDiff);
    }

    #[test]
    fn away_win_predicted_home_win_actual_awards_nothing() {
        let award = score(0, 2, 3, 1);
        assert_eq!(award.points, 0);
        assert_eq!(award.category, AwardCategory::None);
    }

    #[test]
    fn category_and_points_are_consistent() {
        for ph in 0..5 {
            for pa in 0..5 {
                for ah in 0..5 {
                    for aa in 0..5 {
                        let award = score(ph, pa, ah, aa);
                        match award.category {
                            AwardCategory::Exact => assert_eq!(award.points, 8),
                            AwardCategory::WinnerAndDiff => assert_eq!(award.points, 5),
                            AwardCategory::WinnerOnly => assert_eq!(award.points, 3),
                            AwardCategory::None => assert_eq!(award.points, 0),
                        }
                    }
                }
            }
        }
    }
}
