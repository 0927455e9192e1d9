// src/models/amateur_match.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Team size of a pickup match. Stored as the bare number ('5', '7', ...)
/// to match what the mobile client sends.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar")]
pub enum MatchFormat {
    #[serde(rename = "5")]
    #[sqlx(rename = "5")]
    Five,
    #[serde(rename = "7")]
    #[sqlx(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    #[sqlx(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    #[sqlx(rename = "9")]
    Nine,
    #[serde(rename = "11")]
    #[sqlx(rename = "11")]
    Eleven,
}

impl MatchFormat {
    pub fn team_size(&self) -> usize {
        match self {
            MatchFormat::Five => 5,
            MatchFormat::Seven => 7,
            MatchFormat::Eight => 8,
            MatchFormat::Nine => 9,
            MatchFormat::Eleven => 11,
        }
    }
}

/// Lifecycle state of an amateur match. One-way:
/// draft -> voting_open -> finalized.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Draft,
    VotingOpen,
    Finalized,
}

impl MatchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchState::Draft => "draft",
            MatchState::VotingOpen => "voting_open",
            MatchState::Finalized => "finalized",
        }
    }
}

/// The two pickup sides.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Blue,
    Red,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct AmateurMatch {
    pub id: Uuid,
    pub group_id: Uuid,
    pub created_by: Uuid,
    pub format: MatchFormat,
    pub kickoff: DateTime<Utc>,
    pub venue: Option<String>,
    pub state: MatchState,
    pub blue_score: Option<i32>,
    pub red_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchPlayer {
    pub id: Uuid,
    pub match_id: Uuid,
    /// Registered group member this roster entry is linked to, if any.
    /// Guests have only a display name.
    pub user_id: Option<Uuid>,
    pub display_name: String,
    pub team: TeamSide,
    pub position_slot: i32,
    pub goals: Option<i32>,
    pub assists: Option<i32>,
    pub created_at: DateTime<Utc>,
}

// Request/Response DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateMatchRequest {
    pub group_id: Uuid,
    pub format: MatchFormat,
    pub kickoff: DateTime<Utc>,
    pub venue: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AddPlayerRequest {
    pub display_name: String,
    pub user_id: Option<Uuid>,
    pub team: TeamSide,
    pub position_slot: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerTallyEntry {
    pub player_id: Uuid,
    pub goals: i32,
    #[serde(default)]
    pub assists: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CloseMatchRequest {
    pub tallies: Vec<PlayerTallyEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchListItem {
    #[serde(flatten)]
    pub game: AmateurMatch,
    pub players_count: i64,
    pub voters_count: i64,
}

/// One roster entry with its vote aggregate and, when requested by a voter,
/// that voter's own vote.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerWithRating {
    pub player: MatchPlayer,
    pub average: f64,
    pub vote_count: u32,
    pub my_vote: Option<crate::models::vote::PlayerVote>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchSummaryResponse {
    pub game: AmateurMatch,
    pub players: Vec<PlayerWithRating>,
    pub blue_average: f64,
    pub red_average: f64,
    pub mvp: Option<MvpEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MvpEntry {
    pub player_id: Uuid,
    pub display_name: String,
    pub average: f64,
    pub vote_count: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CloseMatchResponse {
    pub game: AmateurMatch,
    pub streaks_updated: u32,
}
