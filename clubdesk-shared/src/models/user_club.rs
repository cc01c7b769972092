/// User-to-club favourites linking table
///
/// Distinct from `club_members`: a row here means the user has attached the
/// club to their account (e.g. favourites list), without any membership
/// role. The cascade delete has to clear this table before the club row can
/// be removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// A user-club link
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserClub {
    /// Linked club
    pub club_id: Uuid,

    /// Linking user
    pub user_id: Uuid,

    /// When the link was created
    pub created_at: DateTime<Utc>,
}

impl UserClub {
    /// Links a user to a club
    pub async fn create(pool: &PgPool, club_id: Uuid, user_id: Uuid) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, UserClub>(
            r#"
            INSERT INTO user_clubs (club_id, user_id)
            VALUES ($1, $2)
            RETURNING club_id, user_id, created_at
            "#,
        )
        .bind(club_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// Deletes every link referencing a club (cascade step)
    pub async fn delete_by_club(
        executor: impl PgExecutor<'_>,
        club_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_clubs WHERE club_id = $1")
            .bind(club_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
