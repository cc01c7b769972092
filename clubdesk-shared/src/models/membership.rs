/// Club membership model and database operations
///
/// Relates a user to a club with a role and a status. When a club is
/// created through the API, the creator automatically receives an
/// owner/active membership.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE club_member_role AS ENUM ('owner', 'member');
/// CREATE TYPE club_member_status AS ENUM ('active', 'pending');
///
/// CREATE TABLE club_members (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     club_id UUID NOT NULL REFERENCES clubs(id),
///     user_id UUID NOT NULL REFERENCES profiles(id),
///     role club_member_role NOT NULL DEFAULT 'member',
///     status club_member_status NOT NULL DEFAULT 'pending',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (club_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Role of a user within a club
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "club_member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Created the club; may manage it
    Owner,

    /// Regular member
    Member,
}

impl MemberRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Member => "member",
        }
    }
}

/// Lifecycle status of a membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "club_member_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Membership is in effect
    Active,

    /// Awaiting approval
    Pending,
}

impl MemberStatus {
    /// Converts status to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Pending => "pending",
        }
    }
}

/// A user's membership in a club
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClubMembership {
    /// Membership ID
    pub id: Uuid,

    /// Club this membership belongs to
    pub club_id: Uuid,

    /// Member user ID
    pub user_id: Uuid,

    /// Role within the club
    pub role: MemberRole,

    /// Membership status
    pub status: MemberStatus,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMembership {
    /// Club ID
    pub club_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role to assign
    pub role: MemberRole,

    /// Initial status
    pub status: MemberStatus,
}

impl ClubMembership {
    /// Creates a new membership (adds a user to a club)
    ///
    /// # Errors
    ///
    /// Returns an error if the (club, user) pair already exists, either
    /// side of the relation is missing, or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateMembership) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, ClubMembership>(
            r#"
            INSERT INTO club_members (club_id, user_id, role, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, club_id, user_id, role, status, created_at
            "#,
        )
        .bind(data.club_id)
        .bind(data.user_id)
        .bind(data.role)
        .bind(data.status)
        .fetch_one(pool)
        .await?;

        Ok(membership)
    }

    /// Lists all memberships of a club, oldest first
    pub async fn list_by_club(pool: &PgPool, club_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let memberships = sqlx::query_as::<_, ClubMembership>(
            r#"
            SELECT id, club_id, user_id, role, status, created_at
            FROM club_members
            WHERE club_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(club_id)
        .fetch_all(pool)
        .await?;

        Ok(memberships)
    }

    /// Finds a specific membership by club and user
    pub async fn find(
        pool: &PgPool,
        club_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, ClubMembership>(
            r#"
            SELECT id, club_id, user_id, role, status, created_at
            FROM club_members
            WHERE club_id = $1 AND user_id = $2
            "#,
        )
        .bind(club_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Deletes every membership of a club (cascade step)
    ///
    /// Returns the number of rows removed; zero is not an error.
    pub async fn delete_by_club(
        executor: impl PgExecutor<'_>,
        club_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM club_members WHERE club_id = $1")
            .bind(club_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Counts all memberships across clubs
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM club_members")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_role_as_str() {
        assert_eq!(MemberRole::Owner.as_str(), "owner");
        assert_eq!(MemberRole::Member.as_str(), "member");
    }

    #[test]
    fn test_member_status_as_str() {
        assert_eq!(MemberStatus::Active.as_str(), "active");
        assert_eq!(MemberStatus::Pending.as_str(), "pending");
    }

    #[test]
    fn test_role_and_status_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&MemberRole::Owner).unwrap(), "\"owner\"");
        assert_eq!(
            serde_json::to_string(&MemberStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
