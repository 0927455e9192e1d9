use sqlx::PgPool;
use uuid::Uuid;

use crate::db::prediction_queries;
use crate::engine::scoring::{self, ScoreAward};
use crate::errors::ApiError;
use crate::models::prediction::{
    FixtureStatus, Prediction, PredictionWithFixture, ScoreRunReport, SimulationRequest,
    UpsertPredictionRequest,
};

/// Max goals a prediction may name per side.
const MAX_PREDICTED_GOALS: i32 = 20;

/// The prediction contest: guess storage, the idempotent scoring pass over
/// finalized fixtures, and the what-if simulator. Both scoring paths call
/// the one `engine::scoring::score` implementation.
pub struct PredictionService {
    pool: PgPool,
}

impl PredictionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn upsert_prediction(
        &self,
        user_id: Uuid,
        request: &UpsertPredictionRequest,
    ) -> Result<Prediction, ApiError> {
        validate_goal_bounds(request.predicted_home, request.predicted_away)?;

        let fixture = prediction_queries::get_fixture(&self.pool, request.fixture_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Fixture not found"))?;

        // Predictions lock the moment the fixture leaves its pre-match state
        if fixture.status != FixtureStatus::Scheduled {
            return Err(ApiError::validation(
                "Predictions are locked once the match has started",
            ));
        }

        let prediction = prediction_queries::upsert_prediction(
            &self.pool,
            user_id,
            request.fixture_id,
            request.predicted_home,
            request.predicted_away,
        )
        .await?;

        tracing::info!(
            "Prediction saved for fixture {} by user {}",
            request.fixture_id,
            user_id
        );
        Ok(prediction)
    }

    pub async fn delete_prediction(
        &self,
        user_id: Uuid,
        prediction_id: Uuid,
    ) -> Result<(), ApiError> {
        let prediction = prediction_queries::get_prediction(&self.pool, prediction_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Prediction not found"))?;
        if prediction.user_id != user_id {
            return Err(ApiError::not_found("Prediction not found"));
        }

        let fixture = prediction_queries::get_fixture(&self.pool, prediction.fixture_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Fixture not found"))?;
        if fixture.status != FixtureStatus::Scheduled {
            return Err(ApiError::validation(
                "Predictions cannot be withdrawn once the match has started",
            ));
        }

        prediction_queries::delete_prediction(&self.pool, prediction_id, user_id).await?;
        Ok(())
    }

    pub async fn list_predictions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PredictionWithFixture>, ApiError> {
        Ok(prediction_queries::list_user_predictions(&self.pool, user_id).await?)
    }

    /// Score every outstanding prediction of this user whose fixture has
    /// finished. Awards are recorded under a `points IS NULL` guard, so
    /// re-running is a no-op for anything already scored.
    pub async fn score_finalized(&self, user_id: Uuid) -> Result<ScoreRunReport, ApiError> {
        let pending = prediction_queries::list_unscored_finished(&self.pool, user_id).await?;

        let mut scored = 0u32;
        let mut points_awarded = 0i32;
        for entry in pending {
            let award = scoring::score(
                entry.predicted_home,
                entry.predicted_away,
                entry.actual_home,
                entry.actual_away,
            );
            let updated = prediction_queries::record_award(
                &self.pool,
                entry.prediction_id,
                award.points,
                award.category.as_str(),
            )
            .await?;
            if updated > 0 {
                scored += 1;
                points_awarded += award.points;
            }
        }

        if scored > 0 {
            tracing::info!(
                "Scored {} predictions for user {} ({} points)",
                scored,
                user_id,
                points_awarded
            );
        }

        Ok(ScoreRunReport {
            scored,
            points_awarded,
        })
    }

    /// What-if evaluation for the simulator. Pure, no persistence; same
    /// rules as the contest pass.
    pub fn simulate(&self, request: &SimulationRequest) -> Result<ScoreAward, ApiError> {
        validate_goal_bounds(request.predicted_home, request.predicted_away)?;
        if request.actual_home < 0 || request.actual_away < 0 {
            return Err(ApiError::validation("Goals cannot be negative"));
        }
        Ok(scoring::score(
            request.predicted_home,
            request.predicted_away,
            request.actual_home,
            request.actual_away,
        ))
    }
}

fn validate_goal_bounds(home: i32, away: i32) -> Result<(), ApiError> {
    if home < 0 || away < 0 || home > MAX_PREDICTED_GOALS || away > MAX_PREDICTED_GOALS {
        return Err(ApiError::validation(format!(
            "Goals must be between 0 and {}",
            MAX_PREDICTED_GOALS
        )));
    }
    Ok(())
}
