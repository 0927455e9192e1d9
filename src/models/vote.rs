// src/models/vote.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One voter's rating of one player in one match. At most one row per
/// (match, player, voter); resubmissions overwrite.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerVote {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub voter_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CastVoteRequest {
    pub player_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoteWithVoter {
    pub rating: i32,
    pub comment: Option<String>,
    pub voter_username: String,
    pub created_at: DateTime<Utc>,
}

/// Full breakdown of one player's votes: distribution histogram, average
/// and the individual (attributed) votes with comments.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerDetailResponse {
    pub player_id: Uuid,
    pub display_name: String,
    pub average: f64,
    pub total_votes: u32,
    pub distribution: [u32; 10],
    pub votes: Vec<VoteWithVoter>,
}
