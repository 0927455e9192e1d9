use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{match_queries, vote_queries};
use crate::engine::aggregator::{self, PlayerStanding, RatingSummary};
use crate::errors::ApiError;
use crate::models::amateur_match::{
    MatchState, MatchSummaryResponse, MvpEntry, PlayerWithRating, TeamSide,
};
use crate::models::vote::{CastVoteRequest, PlayerDetailResponse, PlayerVote};

/// Vote casting plus the read side that feeds the aggregator.
pub struct VoteService {
    pool: PgPool,
}

impl VoteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert the caller's vote for a player. Only while the match is in
    /// voting; rating must be 1..=10.
    pub async fn cast_vote(
        &self,
        match_id: Uuid,
        voter_id: Uuid,
        request: &CastVoteRequest,
    ) -> Result<PlayerVote, ApiError> {
        if !(1..=10).contains(&request.rating) {
            return Err(ApiError::validation("Rating must be between 1 and 10"));
        }

        let game = match_queries::get_match(&self.pool, match_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Match not found"))?;
        if game.state != MatchState::VotingOpen {
            return Err(ApiError::validation("Voting is not open for this match"));
        }

        let player = match_queries::get_player(&self.pool, request.player_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Player not found"))?;
        if player.match_id != match_id {
            return Err(ApiError::not_found("Player is not on this match"));
        }

        let vote = vote_queries::upsert_vote(
            &self.pool,
            match_id,
            request.player_id,
            voter_id,
            request.rating,
            request.comment.as_deref(),
        )
        .await?;

        tracing::info!(
            "Vote recorded for player {} in match {}",
            request.player_id,
            match_id
        );
        Ok(vote)
    }

    /// Roster with per-player aggregates, per-team averages and the MVP.
    /// Tolerates being called with whatever votes are currently visible; a
    /// re-read after a write is the caller's consistency mechanism.
    pub async fn match_summary(
        &self,
        match_id: Uuid,
        caller_id: Uuid,
    ) -> Result<MatchSummaryResponse, ApiError> {
        let game = match_queries::get_match(&self.pool, match_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Match not found"))?;

        let roster = match_queries::get_roster(&self.pool, match_id).await?;
        let votes = vote_queries::get_match_votes(&self.pool, match_id).await?;

        let mut players = Vec::with_capacity(roster.len());
        let mut standings = Vec::with_capacity(roster.len());
        let mut blue_summaries: Vec<RatingSummary> = Vec::new();
        let mut red_summaries: Vec<RatingSummary> = Vec::new();

        for player in roster {
            let ratings: Vec<i32> = votes
                .iter()
                .filter(|v| v.player_id == player.id)
                .map(|v| v.rating)
                .collect();
            let summary = aggregator::aggregate(&ratings);
            let my_vote = votes
                .iter()
                .find(|v| v.player_id == player.id && v.voter_id == caller_id)
                .cloned();

            match player.team {
                TeamSide::Blue => blue_summaries.push(summary.clone()),
                TeamSide::Red => red_summaries.push(summary.clone()),
            }
            standings.push(PlayerStanding {
                player_id: player.id,
                summary: summary.clone(),
                created_at: player.created_at,
            });
            players.push(PlayerWithRating {
                average: summary.average,
                vote_count: summary.vote_count,
                my_vote,
                player,
            });
        }

        let mvp = aggregator::mvp(&standings).and_then(|top| {
            players
                .iter()
                .find(|p| p.player.id == top.player_id)
                .map(|p| MvpEntry {
                    player_id: p.player.id,
                    display_name: p.player.display_name.clone(),
                    average: top.summary.average,
                    vote_count: top.summary.vote_count,
                })
        });

        Ok(MatchSummaryResponse {
            game,
            players,
            blue_average: aggregator::team_average(&blue_summaries),
            red_average: aggregator::team_average(&red_summaries),
            mvp,
        })
    }

    /// Vote distribution and attributed comments for a single player.
    pub async fn player_detail(&self, player_id: Uuid) -> Result<PlayerDetailResponse, ApiError> {
        let player = match_queries::get_player(&self.pool, player_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Player not found"))?;

        let votes = vote_queries::get_player_votes_with_voter(&self.pool, player_id).await?;
        let ratings: Vec<i32> = votes.iter().map(|v| v.rating).collect();
        let summary = aggregator::aggregate(&ratings);

        Ok(PlayerDetailResponse {
            player_id,
            display_name: player.display_name,
            average: summary.average,
            total_votes: summary.vote_count,
            distribution: summary.distribution,
            votes,
        })
    }
}
