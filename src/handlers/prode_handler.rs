use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::prediction::{SimulationRequest, UpsertPredictionRequest};
use crate::services::PredictionService;

fn caller_id(claims: &Claims) -> Result<Uuid, ApiError> {
    claims
        .user_id()
        .ok_or_else(|| ApiError::validation("Invalid user id in token"))
}

#[tracing::instrument(name = "List predictions", skip(pool, claims), fields(user = %claims.username))]
pub async fn list_predictions(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;
    let service = PredictionService::new(pool.get_ref().clone());
    let predictions = service.list_predictions(user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Predictions retrieved", predictions)))
}

#[tracing::instrument(
    name = "Upsert prediction",
    skip(request, pool, claims),
    fields(fixture_id = %request.fixture_id, user = %claims.username)
)]
pub async fn upsert_prediction(
    request: web::Json<UpsertPredictionRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;
    let service = PredictionService::new(pool.get_ref().clone());
    let prediction = service.upsert_prediction(user_id, &request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Prediction saved", prediction)))
}

#[tracing::instrument(name = "Delete prediction", skip(pool, claims), fields(prediction_id = %path, user = %claims.username))]
pub async fn delete_prediction(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;
    let service = PredictionService::new(pool.get_ref().clone());
    service.delete_prediction(user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Prediction deleted")))
}

#[tracing::instrument(name = "Run contest scoring", skip(pool, claims), fields(user = %claims.username))]
pub async fn score_finalized(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;
    let service = PredictionService::new(pool.get_ref().clone());
    let report = service.score_finalized(user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Scoring pass complete", report)))
}

#[tracing::instrument(name = "Simulate score", skip(request, pool))]
pub async fn simulate(
    request: web::Json<SimulationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let service = PredictionService::new(pool.get_ref().clone());
    let award = service.simulate(&request)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Simulation evaluated", award)))
}
