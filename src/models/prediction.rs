// src/models/prediction.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    Scheduled,
    Live,
    Finished,
}

/// A professional match users predict against. Result fields are filled in
/// by the fixture-update collaborator once the match finishes.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Fixture {
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
    pub status: FixtureStatus,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
}

/// A user's predicted scoreline for a fixture. `points` stays NULL until the
/// contest scorer has awarded it; that NULL is the idempotency guard.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Prediction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fixture_id: Uuid,
    pub predicted_home: i32,
    pub predicted_away: i32,
    pub points: Option<i32>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Request/Response DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpsertPredictionRequest {
    pub fixture_id: Uuid,
    pub predicted_home: i32,
    pub predicted_away: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionWithFixture {
    pub prediction: Prediction,
    pub fixture: Fixture,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SimulationRequest {
    pub predicted_home: i32,
    pub predicted_away: i32,
    pub actual_home: i32,
    pub actual_away: i32,
}

/// Outcome of one contest scoring pass.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct ScoreRunReport {
    pub scored: u32,
    pub points_awarded: i32,
}
