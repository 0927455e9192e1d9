// src/routes/amateur.rs
use actix_web::{delete, get, post, web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::amateur_handler;
use crate::middleware::auth::Claims;
use crate::models::amateur_match::{AddPlayerRequest, CloseMatchRequest, CreateMatchRequest};
use crate::models::vote::CastVoteRequest;

/// Create a new draft match
#[post("/matches")]
pub async fn create_match(
    request: web::Json<CreateMatchRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    amateur_handler::create_match(request, pool, claims).await
}

/// List a group's matches with roster/voter counts
#[get("/groups/{group_id}/matches")]
pub async fn list_group_matches(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    amateur_handler::list_group_matches(path, pool).await
}

/// Delete a match (draft or voting only)
#[delete("/matches/{match_id}")]
pub async fn delete_match(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    amateur_handler::delete_match(path, pool, claims).await
}

/// Add a player to the roster
#[post("/matches/{match_id}/players")]
pub async fn add_player(
    path: web::Path<Uuid>,
    request: web::Json<AddPlayerRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    amateur_handler::add_player(path, request, pool, claims).await
}

/// Remove a player from the roster (draft only)
#[delete("/matches/{match_id}/players/{player_id}")]
pub async fn remove_player(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    amateur_handler::remove_player(path, pool, claims).await
}

/// Open the voting window
#[post("/matches/{match_id}/open_voting")]
pub async fn open_voting(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    amateur_handler::open_voting(path, pool, claims).await
}

/// Close the match with per-player goal tallies
#[post("/matches/{match_id}/close")]
pub async fn close_match(
    path: web::Path<Uuid>,
    request: web::Json<CloseMatchRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    amateur_handler::close_match(path, request, pool, claims).await
}

/// Cast or update the caller's vote for a player
#[post("/matches/{match_id}/votes")]
pub async fn cast_vote(
    path: web::Path<Uuid>,
    request: web::Json<CastVoteRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    amateur_handler::cast_vote(path, request, pool, claims).await
}

/// Roster with aggregates, team averages and MVP
#[get("/matches/{match_id}/summary")]
pub async fn match_summary(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    amateur_handler::match_summary(path, pool, claims).await
}

/// Vote distribution and attributed votes for one player
#[get("/players/{player_id}/detail")]
pub async fn player_detail(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    amateur_handler::player_detail(path, pool).await
}

/// Formation catalog for a team size
#[get("/formations/{format}")]
pub async fn get_formations(path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    amateur_handler::get_formations(path).await
}
