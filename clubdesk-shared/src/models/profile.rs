/// Profile model and database operations
///
/// Profiles are the platform's users and also the authentication
/// principals: login works against `email`/`password_hash`. A profile may
/// reference a preferred club, which is why club deletion has to clear
/// `preferred_club_id` before the club row can go away.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE profiles (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     name TEXT,
///     preferred_club_id UUID REFERENCES clubs(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// A platform user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    /// Profile ID
    pub id: Uuid,

    /// Unique email address (login identifier)
    pub email: String,

    /// Argon2id password hash — never serialized to clients
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Optional display name
    pub name: Option<String>,

    /// Club the user marked as preferred, if any
    pub preferred_club_id: Option<Uuid>,

    /// When the profile was created
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,

    /// When the user last logged in
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfile {
    /// Email address
    pub email: String,

    /// Pre-hashed password (argon2id)
    pub password_hash: String,

    /// Optional display name
    pub name: Option<String>,
}

const PROFILE_COLUMNS: &str = "id, email, password_hash, name, preferred_club_id, \
                               created_at, updated_at, last_login_at";

impl Profile {
    /// Creates a new profile
    ///
    /// # Errors
    ///
    /// Returns an error on a duplicate email (unique constraint) or when
    /// the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateProfile) -> Result<Self, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by email (login lookup)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Records a successful login
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE profiles SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clears preferred-club references to a club (cascade step 1 fallback)
    ///
    /// Returns the number of profiles touched; zero is not an error.
    pub async fn nullify_preferred_club(
        executor: impl PgExecutor<'_>,
        club_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE profiles SET preferred_club_id = NULL WHERE preferred_club_id = $1",
        )
        .bind(club_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Counts all profiles
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
