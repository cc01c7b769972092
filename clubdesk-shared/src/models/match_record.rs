/// Match and match-participant models
///
/// Matches are modeled only as far as cascade deletion and the statistics
/// aggregator require: creation (mainly for seeding and tests), ID lookups
/// by club, and bulk deletes in foreign-key order. The full match lifecycle
/// lives in the player-facing product, not in this admin backend.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE matches (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     club_id UUID NOT NULL REFERENCES clubs(id),
///     status TEXT NOT NULL DEFAULT 'scheduled',
///     current_participants INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE match_participants (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     match_id UUID NOT NULL REFERENCES matches(id),
///     user_id UUID NOT NULL REFERENCES profiles(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (match_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// A match hosted at a club
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Match {
    /// Match ID
    pub id: Uuid,

    /// Hosting club
    pub club_id: Uuid,

    /// Free-form lifecycle label (e.g. "scheduled", "completed")
    pub status: String,

    /// Number of participants currently signed up
    pub current_participants: i32,

    /// When the match was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatch {
    /// Hosting club
    pub club_id: Uuid,

    /// Lifecycle label
    pub status: String,

    /// Participant counter
    pub current_participants: i32,
}

/// A user's participation in a match
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchParticipant {
    /// Participation ID
    pub id: Uuid,

    /// Match joined
    pub match_id: Uuid,

    /// Participating user
    pub user_id: Uuid,

    /// When the user joined
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Creates a match
    pub async fn create(pool: &PgPool, data: CreateMatch) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (club_id, status, current_participants)
            VALUES ($1, $2, $3)
            RETURNING id, club_id, status, current_participants, created_at
            "#,
        )
        .bind(data.club_id)
        .bind(data.status)
        .bind(data.current_participants)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// Returns the IDs of every match hosted by a club
    ///
    /// Used by the stepwise cascade to delete participants before matches.
    pub async fn ids_by_club(
        executor: impl PgExecutor<'_>,
        club_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let ids: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM matches WHERE club_id = $1")
            .bind(club_id)
            .fetch_all(executor)
            .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// Deletes every match of a club (cascade step)
    pub async fn delete_by_club(
        executor: impl PgExecutor<'_>,
        club_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM matches WHERE club_id = $1")
            .bind(club_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Counts all matches
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM matches")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

impl MatchParticipant {
    /// Adds a user to a match
    pub async fn create(
        pool: &PgPool,
        match_id: Uuid,
        user_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, MatchParticipant>(
            r#"
            INSERT INTO match_participants (match_id, user_id)
            VALUES ($1, $2)
            RETURNING id, match_id, user_id, created_at
            "#,
        )
        .bind(match_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// Deletes every participant row referencing the given matches
    ///
    /// An empty ID list is a no-op. Zero rows affected is not an error.
    pub async fn delete_for_matches(
        executor: impl PgExecutor<'_>,
        match_ids: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        if match_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM match_participants WHERE match_id = ANY($1)")
            .bind(match_ids)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Counts all participant rows
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM match_participants")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
