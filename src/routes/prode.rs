// src/routes/prode.rs
use actix_web::{delete, get, post, web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::prode_handler;
use crate::middleware::auth::Claims;
use crate::models::prediction::{SimulationRequest, UpsertPredictionRequest};

/// The caller's predictions with their fixtures
#[get("/predictions")]
pub async fn list_predictions(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    prode_handler::list_predictions(pool, claims).await
}

/// Save or overwrite a prediction
#[post("/predictions")]
pub async fn upsert_prediction(
    request: web::Json<UpsertPredictionRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    prode_handler::upsert_prediction(request, pool, claims).await
}

/// Withdraw a prediction while its fixture is still scheduled
#[delete("/predictions/{prediction_id}")]
pub async fn delete_prediction(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    prode_handler::delete_prediction(path, pool, claims).await
}

/// Score the caller's outstanding predictions against finished fixtures
#[post("/score")]
pub async fn score_finalized(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    prode_handler::score_finalized(pool, claims).await
}

/// What-if evaluation of a prediction against a hypothetical result
#[post("/simulate")]
pub async fn simulate(
    request: web::Json<SimulationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    prode_handler::simulate(request, pool).await
}
