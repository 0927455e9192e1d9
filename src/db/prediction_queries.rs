use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::prediction::{Fixture, Prediction, PredictionWithFixture};

pub async fn get_fixture(pool: &PgPool, fixture_id: Uuid) -> Result<Option<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>("SELECT * FROM fixtures WHERE id = $1")
        .bind(fixture_id)
        .fetch_optional(pool)
        .await
}

/// Upsert keyed by (user, fixture): re-submitting a prediction overwrites
/// the previous guess. Lock enforcement happens in the service before this
/// runs, so an already-scored prediction can never reach this statement.
pub async fn upsert_prediction(
    pool: &PgPool,
    user_id: Uuid,
    fixture_id: Uuid,
    predicted_home: i32,
    predicted_away: i32,
) -> Result<Prediction, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(
        r#"
        INSERT INTO predictions (user_id, fixture_id, predicted_home, predicted_away)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, fixture_id)
        DO UPDATE SET predicted_home = $3, predicted_away = $4, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(fixture_id)
    .bind(predicted_home)
    .bind(predicted_away)
    .fetch_one(pool)
    .await
}

pub async fn get_prediction(
    pool: &PgPool,
    prediction_id: Uuid,
) -> Result<Option<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>("SELECT * FROM predictions WHERE id = $1")
        .bind(prediction_id)
        .fetch_optional(pool)
        .await
}

pub async fn delete_prediction(
    pool: &PgPool,
    prediction_id: Uuid,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM predictions WHERE id = $1 AND user_id = $2")
        .bind(prediction_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list_user_predictions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PredictionWithFixture>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT
            p.id, p.user_id, p.fixture_id, p.predicted_home, p.predicted_away,
            p.points, p.category, p.created_at, p.updated_at,
            f.id AS f_id, f.home_team, f.away_team, f.kickoff, f.status,
            f.home_goals, f.away_goals
        FROM predictions p
        JOIN fixtures f ON f.id = p.fixture_id
        WHERE p.user_id = $1
        ORDER BY f.kickoff DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let predictions = rows
        .into_iter()
        .map(|row| PredictionWithFixture {
            prediction: Prediction {
                id: row.get("id"),
                user_id: row.get("user_id"),
                fixture_id: row.get("fixture_id"),
                predicted_home: row.get("predicted_home"),
                predicted_away: row.get("predicted_away"),
                points: row.get("points"),
                category: row.get("category"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            },
            fixture: Fixture {
                id: row.get("f_id"),
                home_team: row.get("home_team"),
                away_team: row.get("away_team"),
                kickoff: row.get("kickoff"),
                status: row.get("status"),
                home_goals: row.get("home_goals"),
                away_goals: row.get("away_goals"),
            },
        })
        .collect();

    Ok(predictions)
}

/// A prediction awaiting scoring, paired with its finished fixture's result.
#[derive(Debug)]
pub struct UnscoredPrediction {
    pub prediction_id: Uuid,
    pub predicted_home: i32,
    pub predicted_away: i32,
    pub actual_home: i32,
    pub actual_away: i32,
}

/// Predictions of this user whose fixture has finished but whose award has
/// not been recorded yet (`points IS NULL`).
pub async fn list_unscored_finished(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<UnscoredPrediction>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.predicted_home, p.predicted_away, f.home_goals, f.away_goals
        FROM predictions p
        JOIN fixtures f ON f.id = p.fixture_id
        WHERE p.user_id = $1
          AND p.points IS NULL
          AND f.status = 'finished'
          AND f.home_goals IS NOT NULL
          AND f.away_goals IS NOT NULL
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| UnscoredPrediction {
            prediction_id: row.get("id"),
            predicted_home: row.get("predicted_home"),
            predicted_away: row.get("predicted_away"),
            actual_home: row.get("home_goals"),
            actual_away: row.get("away_goals"),
        })
        .collect())
}

/// Record an award. The `points IS NULL` guard makes a repeated scoring
/// pass a no-op for already-scored predictions.
pub async fn record_award(
    pool: &PgPool,
    prediction_id: Uuid,
    points: i32,
    category: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE predictions
        SET points = $2, category = $3, updated_at = NOW()
        WHERE id = $1 AND points IS NULL
        "#,
    )
    .bind(prediction_id)
    .bind(points)
    .bind(category)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
