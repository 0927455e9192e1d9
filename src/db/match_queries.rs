use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::models::amateur_match::{
    AddPlayerRequest, AmateurMatch, CreateMatchRequest, MatchPlayer, TeamSide,
};

pub async fn insert_match(
    pool: &PgPool,
    request: &CreateMatchRequest,
    created_by: Uuid,
) -> Result<AmateurMatch, sqlx::Error> {
    sqlx::query_as::<_, AmateurMatch>(
        r#"
        INSERT INTO amateur_matches (group_id, created_by, format, kickoff, venue, state)
        VALUES ($1, $2, $3, $4, $5, 'draft')
        RETURNING *
        "#,
    )
    .bind(request.group_id)
    .bind(created_by)
    .bind(request.format)
    .bind(request.kickoff)
    .bind(&request.venue)
    .fetch_one(pool)
    .await
}

pub async fn get_match(pool: &PgPool, match_id: Uuid) -> Result<Option<AmateurMatch>, sqlx::Error> {
    sqlx::query_as::<_, AmateurMatch>("SELECT * FROM amateur_matches WHERE id = $1")
        .bind(match_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_group_matches(
    pool: &PgPool,
    group_id: Uuid,
) -> Result<Vec<AmateurMatch>, sqlx::Error> {
    sqlx::query_as::<_, AmateurMatch>(
        "SELECT * FROM amateur_matches WHERE group_id = $1 ORDER BY kickoff DESC",
    )
    .bind(group_id)
    .fetch_all(pool)
    .await
}

/// Roster size and distinct voter count for a match list row.
pub async fn match_counts(pool: &PgPool, match_id: Uuid) -> Result<(i64, i64), sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM match_players WHERE match_id = $1) AS players_count,
            (SELECT COUNT(DISTINCT voter_id) FROM player_votes WHERE match_id = $1) AS voters_count
        "#,
    )
    .bind(match_id)
    .fetch_one(pool)
    .await?;

    Ok((row.get("players_count"), row.get("voters_count")))
}

/// Conditional transition draft -> voting_open. Returns the number of rows
/// updated; zero means the match was not in draft.
pub async fn mark_voting_open(pool: &PgPool, match_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE amateur_matches
        SET state = 'voting_open', updated_at = NOW()
        WHERE id = $1 AND state = 'draft'
        "#,
    )
    .bind(match_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Conditional transition voting_open -> finalized, carrying the derived
/// final score. The state guard in the WHERE clause is what serializes
/// concurrent close attempts: only the first caller gets a row back.
pub async fn finalize_match(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    blue_score: i32,
    red_score: i32,
) -> Result<Option<AmateurMatch>, sqlx::Error> {
    sqlx::query_as::<_, AmateurMatch>(
        r#"
        UPDATE amateur_matches
        SET state = 'finalized',
            blue_score = $2,
            red_score = $3,
            updated_at = NOW()
        WHERE id = $1 AND state = 'voting_open'
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(blue_score)
    .bind(red_score)
    .fetch_optional(&mut **tx)
    .await
}

/// Delete a match unless it is finalized. Players and votes cascade.
pub async fn delete_match(pool: &PgPool, match_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM amateur_matches WHERE id = $1 AND state <> 'finalized'")
        .bind(match_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

// Roster

pub async fn insert_player(
    pool: &PgPool,
    match_id: Uuid,
    request: &AddPlayerRequest,
) -> Result<MatchPlayer, sqlx::Error> {
    sqlx::query_as::<_, MatchPlayer>(
        r#"
        INSERT INTO match_players (match_id, user_id, display_name, team, position_slot)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(request.user_id)
    .bind(&request.display_name)
    .bind(request.team)
    .bind(request.position_slot)
    .fetch_one(pool)
    .await
}

pub async fn get_roster(pool: &PgPool, match_id: Uuid) -> Result<Vec<MatchPlayer>, sqlx::Error> {
    sqlx::query_as::<_, MatchPlayer>(
        r#"
        SELECT * FROM match_players
        WHERE match_id = $1
        ORDER BY team, position_slot
        "#,
    )
    .bind(match_id)
    .fetch_all(pool)
    .await
}

pub async fn get_player(pool: &PgPool, player_id: Uuid) -> Result<Option<MatchPlayer>, sqlx::Error> {
    sqlx::query_as::<_, MatchPlayer>("SELECT * FROM match_players WHERE id = $1")
        .bind(player_id)
        .fetch_optional(pool)
        .await
}

pub async fn slot_taken(
    pool: &PgPool,
    match_id: Uuid,
    team: TeamSide,
    position_slot: i32,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM match_players
            WHERE match_id = $1 AND team = $2 AND position_slot = $3
        ) AS taken
        "#,
    )
    .bind(match_id)
    .bind(team)
    .bind(position_slot)
    .fetch_one(pool)
    .await?;

    Ok(row.get("taken"))
}

pub async fn team_player_count(
    pool: &PgPool,
    match_id: Uuid,
    team: TeamSide,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS team_count FROM match_players WHERE match_id = $1 AND team = $2",
    )
    .bind(match_id)
    .bind(team)
    .fetch_one(pool)
    .await?;

    Ok(row.get("team_count"))
}

pub async fn player_vote_count(pool: &PgPool, player_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS vote_count FROM player_votes WHERE player_id = $1")
        .bind(player_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get("vote_count"))
}

pub async fn delete_player(pool: &PgPool, player_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM match_players WHERE id = $1")
        .bind(player_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

// Closure writes, all inside the finalize transaction

pub async fn set_player_tally(
    tx: &mut Transaction<'_, Postgres>,
    player_id: Uuid,
    goals: i32,
    assists: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE match_players SET goals = $2, assists = $3 WHERE id = $1")
        .bind(player_id)
        .bind(goals)
        .bind(assists)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn record_streak_win(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_streaks (user_id, current_streak, best_streak)
        VALUES ($1, 1, 1)
        ON CONFLICT (user_id) DO UPDATE
        SET current_streak = user_streaks.current_streak + 1,
            best_streak = GREATEST(user_streaks.best_streak, user_streaks.current_streak + 1),
            updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn record_streak_loss(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_streaks (user_id, current_streak, best_streak)
        VALUES ($1, 0, 0)
        ON CONFLICT (user_id) DO UPDATE
        SET current_streak = 0,
            updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
