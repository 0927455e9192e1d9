use sqlx::PgPool;
use uuid::Uuid;

use crate::db::match_queries;
use crate::errors::ApiError;
use crate::models::amateur_match::{AddPlayerRequest, MatchPlayer, MatchState};

/// Roster assembly: placing players into team slots and enforcing the
/// occupancy constraints.
///
/// Rosters are mutable only while the match is in draft. Locking at
/// voting_open means every player is votable for the whole voting window,
/// and a player with votes can never be removed out from under them.
pub struct RosterService {
    pool: PgPool,
}

impl RosterService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add_player(
        &self,
        match_id: Uuid,
        request: &AddPlayerRequest,
    ) -> Result<MatchPlayer, ApiError> {
        if request.display_name.trim().is_empty() {
            return Err(ApiError::validation("Player name cannot be empty"));
        }

        let game = match_queries::get_match(&self.pool, match_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Match not found"))?;

        if game.state != MatchState::Draft {
            return Err(ApiError::validation(
                "Roster is locked once voting has opened",
            ));
        }

        let team_size = game.format.team_size() as i32;
        if request.position_slot < 0 || request.position_slot >= team_size {
            return Err(ApiError::validation(format!(
                "Position slot must be between 0 and {} for this format",
                team_size - 1
            )));
        }

        let team_count =
            match_queries::team_player_count(&self.pool, match_id, request.team).await?;
        if team_count >= team_size as i64 {
            return Err(ApiError::validation(format!(
                "Team already has {} players",
                team_size
            )));
        }

        if match_queries::slot_taken(&self.pool, match_id, request.team, request.position_slot)
            .await?
        {
            return Err(ApiError::validation("That position is already taken"));
        }

        let player = match match_queries::insert_player(&self.pool, match_id, request).await {
            Ok(player) => player,
            // The unique (match, team, slot) index catches the race the
            // pre-check cannot
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(ApiError::conflict("That position was just taken"));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            "Added player {} to match {} ({:?} slot {})",
            player.id,
            match_id,
            player.team,
            player.position_slot
        );
        Ok(player)
    }

    pub async fn remove_player(&self, match_id: Uuid, player_id: Uuid) -> Result<(), ApiError> {
        let game = match_queries::get_match(&self.pool, match_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Match not found"))?;

        if game.state != MatchState::Draft {
            return Err(ApiError::validation(
                "Players can only be removed while the match is a draft",
            ));
        }

        let player = match_queries::get_player(&self.pool, player_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Player not found"))?;
        if player.match_id != match_id {
            return Err(ApiError::not_found("Player is not on this match"));
        }

        // Votes only exist after draft, so this should never fire; refuse
        // rather than orphan votes if the invariant is ever broken.
        if match_queries::player_vote_count(&self.pool, player_id).await? > 0 {
            return Err(ApiError::conflict(
                "Player already has votes and cannot be removed",
            ));
        }

        match_queries::delete_player(&self.pool, player_id).await?;
        tracing::info!("Removed player {} from match {}", player_id, match_id);
        Ok(())
    }

    pub async fn get_roster(&self, match_id: Uuid) -> Result<Vec<MatchPlayer>, ApiError> {
        Ok(match_queries::get_roster(&self.pool, match_id).await?)
    }
}
