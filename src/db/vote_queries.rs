use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::vote::{PlayerVote, VoteWithVoter};

/// Upsert keyed by (match, player, voter): casting a second vote for the
/// same player overwrites the first instead of appending.
pub async fn upsert_vote(
    pool: &PgPool,
    match_id: Uuid,
    player_id: Uuid,
    voter_id: Uuid,
    rating: i32,
    comment: Option<&str>,
) -> Result<PlayerVote, sqlx::Error> {
    sqlx::query_as::<_, PlayerVote>(
        r#"
        INSERT INTO player_votes (match_id, player_id, voter_id, rating, comment)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (match_id, player_id, voter_id)
        DO UPDATE SET rating = $4, comment = $5, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(player_id)
    .bind(voter_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(pool)
    .await
}

/// All votes for a match, across players. The aggregator groups them.
pub async fn get_match_votes(pool: &PgPool, match_id: Uuid) -> Result<Vec<PlayerVote>, sqlx::Error> {
    sqlx::query_as::<_, PlayerVote>("SELECT * FROM player_votes WHERE match_id = $1")
        .bind(match_id)
        .fetch_all(pool)
        .await
}

/// One player's votes with voter attribution, newest first.
pub async fn get_player_votes_with_voter(
    pool: &PgPool,
    player_id: Uuid,
) -> Result<Vec<VoteWithVoter>, sqlx::Error> {
    let votes = sqlx::query(
        r#"
        SELECT pv.rating, pv.comment, pv.created_at, u.username AS voter_username
        FROM player_votes pv
        JOIN users u ON u.id = pv.voter_id
        WHERE pv.player_id = $1
        ORDER BY pv.created_at DESC
        "#,
    )
    .bind(player_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| VoteWithVoter {
        rating: row.get("rating"),
        comment: row.get("comment"),
        voter_username: row.get("voter_username"),
        created_at: row.get("created_at"),
    })
    .collect();

    Ok(votes)
}
