use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::match_queries;
use crate::engine::lifecycle::{self, ClosureTally, SideOutcome};
use crate::errors::ApiError;
use crate::models::amateur_match::{
    AmateurMatch, CloseMatchRequest, CloseMatchResponse, CreateMatchRequest, MatchListItem,
    MatchState, TeamSide,
};

/// Lifecycle operations on amateur matches: creation, the one-way state
/// transitions, and deletion.
pub struct MatchService {
    pool: PgPool,
}

impl MatchService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_match(
        &self,
        request: &CreateMatchRequest,
        created_by: Uuid,
    ) -> Result<AmateurMatch, ApiError> {
        if let Some(venue) = &request.venue {
            if venue.trim().is_empty() {
                return Err(ApiError::validation("Venue cannot be blank"));
            }
        }

        let game = match_queries::insert_match(&self.pool, request, created_by).await?;
        tracing::info!("Created {} draft match {}", game.format.team_size(), game.id);
        Ok(game)
    }

    pub async fn list_group_matches(&self, group_id: Uuid) -> Result<Vec<MatchListItem>, ApiError> {
        let matches = match_queries::list_group_matches(&self.pool, group_id).await?;

        let mut items = Vec::with_capacity(matches.len());
        for game in matches {
            let (players_count, voters_count) =
                match_queries::match_counts(&self.pool, game.id).await?;
            items.push(MatchListItem {
                game,
                players_count,
                voters_count,
            });
        }
        Ok(items)
    }

    /// draft -> voting_open. Requires at least one roster player; voting on
    /// an empty match is meaningless.
    pub async fn open_voting(&self, match_id: Uuid) -> Result<(), ApiError> {
        let game = self.require_match(match_id).await?;

        if !lifecycle::can_transition(game.state, MatchState::VotingOpen) {
            return Err(ApiError::conflict(format!(
                "Cannot open voting on a match in state '{}'",
                game.state.as_str()
            )));
        }

        let roster = match_queries::get_roster(&self.pool, match_id).await?;
        if roster.is_empty() {
            return Err(ApiError::validation(
                "Cannot open voting on a match with no players",
            ));
        }

        let updated = match_queries::mark_voting_open(&self.pool, match_id).await?;
        if updated == 0 {
            // Someone else transitioned the match between our read and write
            return Err(ApiError::conflict("Match is no longer in draft"));
        }

        tracing::info!("Voting opened for match {}", match_id);
        Ok(())
    }

    /// voting_open -> finalized. Derives each side's final score from the
    /// per-player goal tallies and updates win streaks for roster players
    /// linked to registered users. Score, tallies and streaks are written in
    /// a single transaction guarded by the state check, so a concurrent or
    /// repeated close cannot double-apply streaks.
    pub async fn close_match(
        &self,
        match_id: Uuid,
        request: &CloseMatchRequest,
    ) -> Result<CloseMatchResponse, ApiError> {
        let game = self.require_match(match_id).await?;

        if game.state == MatchState::Finalized {
            return Err(ApiError::conflict("Match is already finalized"));
        }
        if !lifecycle::can_transition(game.state, MatchState::Finalized) {
            return Err(ApiError::validation(
                "A match must be in voting before it can be closed",
            ));
        }

        let roster = match_queries::get_roster(&self.pool, match_id).await?;

        let mut tallies: HashMap<Uuid, ClosureTally> = HashMap::new();
        for entry in &request.tallies {
            if entry.goals < 0 || entry.assists < 0 {
                return Err(ApiError::validation("Goals and assists cannot be negative"));
            }
            if !roster.iter().any(|p| p.id == entry.player_id) {
                return Err(ApiError::validation(format!(
                    "Player {} is not on this match's roster",
                    entry.player_id
                )));
            }
            tallies.insert(
                entry.player_id,
                ClosureTally {
                    goals: entry.goals,
                    assists: entry.assists,
                },
            );
        }

        let (blue_score, red_score) = lifecycle::final_scores(&roster, &tallies);

        let mut tx = self.pool.begin().await?;

        let closed = match match_queries::finalize_match(&mut tx, match_id, blue_score, red_score)
            .await?
        {
            Some(game) => game,
            None => {
                // Lost the race: another close finished first
                tx.rollback().await?;
                return Err(ApiError::conflict("Match was already closed"));
            }
        };

        for player in &roster {
            let tally = tallies.get(&player.id).copied().unwrap_or_default();
            match_queries::set_player_tally(&mut tx, player.id, tally.goals, tally.assists).await?;
        }

        let mut streaks_updated = 0u32;
        for player in &roster {
            let Some(user_id) = player.user_id else {
                continue;
            };
            let (scored, conceded) = match player.team {
                TeamSide::Blue => (blue_score, red_score),
                TeamSide::Red => (red_score, blue_score),
            };
            match lifecycle::side_outcome(scored, conceded) {
                SideOutcome::Won => {
                    match_queries::record_streak_win(&mut tx, user_id).await?;
                    streaks_updated += 1;
                }
                SideOutcome::Lost => {
                    match_queries::record_streak_loss(&mut tx, user_id).await?;
                    streaks_updated += 1;
                }
                SideOutcome::Drew => {}
            }
        }

        tx.commit().await?;

        tracing::info!(
            "Closed match {}: blue {} - red {} ({} streaks updated)",
            match_id,
            blue_score,
            red_score,
            streaks_updated
        );

        Ok(CloseMatchResponse {
            game: closed,
            streaks_updated,
        })
    }

    /// Deletion is permitted in draft and voting_open only; votes and roster
    /// entries cascade with the match row.
    pub async fn delete_match(&self, match_id: Uuid) -> Result<(), ApiError> {
        let game = self.require_match(match_id).await?;

        if game.state == MatchState::Finalized {
            return Err(ApiError::conflict("A finalized match cannot be deleted"));
        }

        let deleted = match_queries::delete_match(&self.pool, match_id).await?;
        if deleted == 0 {
            return Err(ApiError::conflict("Match was finalized concurrently"));
        }

        tracing::info!("Deleted match {}", match_id);
        Ok(())
    }

    pub async fn require_match(&self, match_id: Uuid) -> Result<AmateurMatch, ApiError> {
        match_queries::get_match(&self.pool, match_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Match not found"))
    }
}
