use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::engine::formations;
use crate::errors::ApiError;
use crate::middleware::auth::Claims;
use crate::models::amateur_match::*;
use crate::models::common::ApiResponse;
use crate::models::vote::CastVoteRequest;
use crate::services::{MatchService, RosterService, VoteService};

fn caller_id(claims: &Claims) -> Result<Uuid, ApiError> {
    claims
        .user_id()
        .ok_or_else(|| ApiError::validation("Invalid user id in token"))
}

#[tracing::instrument(
    name = "Create amateur match",
    skip(request, pool, claims),
    fields(group_id = %request.group_id, user = %claims.username)
)]
pub async fn create_match(
    request: web::Json<CreateMatchRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let created_by = caller_id(&claims)?;
    let service = MatchService::new(pool.get_ref().clone());
    let game = service.create_match(&request, created_by).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Match created", game)))
}

#[tracing::instrument(name = "List group matches", skip(pool), fields(group_id = %path))]
pub async fn list_group_matches(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let service = MatchService::new(pool.get_ref().clone());
    let matches = service.list_group_matches(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Matches retrieved", matches)))
}

#[tracing::instrument(name = "Delete amateur match", skip(pool, claims), fields(match_id = %path, user = %claims.username))]
pub async fn delete_match(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let service = MatchService::new(pool.get_ref().clone());
    service.delete_match(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Match deleted")))
}

#[tracing::instrument(
    name = "Add roster player",
    skip(request, pool, claims),
    fields(match_id = %path, user = %claims.username)
)]
pub async fn add_player(
    path: web::Path<Uuid>,
    request: web::Json<AddPlayerRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let service = RosterService::new(pool.get_ref().clone());
    let player = service.add_player(path.into_inner(), &request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Player added", player)))
}

#[tracing::instrument(name = "Remove roster player", skip(pool, claims), fields(user = %claims.username))]
pub async fn remove_player(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let (match_id, player_id) = path.into_inner();
    let service = RosterService::new(pool.get_ref().clone());
    service.remove_player(match_id, player_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Player removed")))
}

#[tracing::instrument(name = "Open voting", skip(pool, claims), fields(match_id = %path, user = %claims.username))]
pub async fn open_voting(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let service = MatchService::new(pool.get_ref().clone());
    service.open_voting(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Voting opened")))
}

#[tracing::instrument(
    name = "Close amateur match",
    skip(request, pool, claims),
    fields(match_id = %path, user = %claims.username)
)]
pub async fn close_match(
    path: web::Path<Uuid>,
    request: web::Json<CloseMatchRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let service = MatchService::new(pool.get_ref().clone());
    let closed = service.close_match(path.into_inner(), &request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match closed", closed)))
}

#[tracing::instrument(
    name = "Cast player vote",
    skip(request, pool, claims),
    fields(match_id = %path, user = %claims.username)
)]
pub async fn cast_vote(
    path: web::Path<Uuid>,
    request: web::Json<CastVoteRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let voter_id = caller_id(&claims)?;
    let service = VoteService::new(pool.get_ref().clone());
    let vote = service
        .cast_vote(path.into_inner(), voter_id, &request)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Vote recorded", vote)))
}

#[tracing::instrument(name = "Get match summary", skip(pool, claims), fields(match_id = %path, user = %claims.username))]
pub async fn match_summary(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_id(&claims)?;
    let service = VoteService::new(pool.get_ref().clone());
    let summary = service.match_summary(path.into_inner(), caller).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Summary retrieved", summary)))
}

#[tracing::instrument(name = "Get player detail", skip(pool), fields(player_id = %path))]
pub async fn player_detail(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let service = VoteService::new(pool.get_ref().clone());
    let detail = service.player_detail(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Player detail retrieved", detail)))
}

#[tracing::instrument(name = "Get formations", skip(path))]
pub async fn get_formations(path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let format = match path.as_str() {
        "5" => MatchFormat::Five,
        "7" => MatchFormat::Seven,
        "8" => MatchFormat::Eight,
        "9" => MatchFormat::Nine,
        "11" => MatchFormat::Eleven,
        other => {
            return Err(ApiError::validation(format!(
                "Unknown match format '{}'",
                other
            )))
        }
    };
    let catalog = formations::formations_for(format);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Formations retrieved", catalog)))
}
