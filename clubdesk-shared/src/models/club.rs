/// Club model and database operations
///
/// A club is a venue record: a name, a free-text "City, Country" location
/// label, and optionally a street address and coordinates. The
/// `member_count` column is maintained server-side; clients never write it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE clubs (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL CHECK (name <> ''),
///     location TEXT NOT NULL CHECK (location <> ''),
///     address TEXT,
///     latitude DOUBLE PRECISION,
///     longitude DOUBLE PRECISION,
///     member_count INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CHECK ((latitude IS NULL) = (longitude IS NULL))
/// );
/// ```
///
/// # Invariants
///
/// - `location` is never persisted empty: the schema forbids it and
///   [`Club::update`] substitutes [`LOCATION_PLACEHOLDER`] when a caller
///   explicitly supplies a blank value.
/// - `latitude`/`longitude` are paired: both present or both absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Substituted for an explicitly-supplied empty location on update, since
/// the schema requires a non-empty label.
pub const LOCATION_PLACEHOLDER: &str = "Non spécifié";

/// Club model representing a venue record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Club {
    /// Club ID
    pub id: Uuid,

    /// Display name (non-empty)
    pub name: String,

    /// Free-text city/country label (never empty)
    pub location: String,

    /// Optional street address
    pub address: Option<String>,

    /// Latitude in degrees (paired with longitude)
    pub latitude: Option<f64>,

    /// Longitude in degrees (paired with latitude)
    pub longitude: Option<f64>,

    /// Server-maintained member counter
    pub member_count: i32,

    /// When the club was created (database-assigned)
    pub created_at: DateTime<Utc>,

    /// When the club was last updated (database-assigned)
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a club
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClub {
    /// Display name (required, non-empty)
    pub name: String,

    /// City/country label
    pub location: String,

    /// Optional street address
    pub address: Option<String>,

    /// Latitude (supply with longitude or not at all)
    pub latitude: Option<f64>,

    /// Longitude (supply with latitude or not at all)
    pub longitude: Option<f64>,
}

/// Partial update for a club
///
/// Only fields set to `Some` are written; everything else is left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClub {
    /// New display name
    pub name: Option<String>,

    /// New location label; a blank value is replaced with
    /// [`LOCATION_PLACEHOLDER`] before the write
    pub location: Option<String>,

    /// New street address
    pub address: Option<String>,

    /// New latitude
    pub latitude: Option<f64>,

    /// New longitude
    pub longitude: Option<f64>,
}

/// Replaces a blank location label with [`LOCATION_PLACEHOLDER`].
///
/// The clubs table requires a non-empty `location`, but the admin form lets
/// a user clear the field; the original system persisted the placeholder in
/// that case and so do we.
pub fn normalize_location(location: &str) -> String {
    if location.trim().is_empty() {
        LOCATION_PLACEHOLDER.to_string()
    } else {
        location.to_string()
    }
}

const CLUB_COLUMNS: &str =
    "id, name, location, address, latitude, longitude, member_count, created_at, updated_at";

impl Club {
    /// Lists all clubs, newest first
    ///
    /// Returns an empty vector when the table is empty, never an error for
    /// "no rows".
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let clubs = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(clubs)
    }

    /// Creates a new club
    ///
    /// # Errors
    ///
    /// Returns an error if the insert violates a constraint (empty name or
    /// location, unpaired coordinates) or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateClub) -> Result<Self, sqlx::Error> {
        let club = sqlx::query_as::<_, Club>(&format!(
            r#"
            INSERT INTO clubs (name, location, address, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CLUB_COLUMNS}
            "#
        ))
        .bind(data.name)
        .bind(data.location)
        .bind(data.address)
        .bind(data.latitude)
        .bind(data.longitude)
        .fetch_one(pool)
        .await?;

        Ok(club)
    }

    /// Finds a club by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let club = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(club)
    }

    /// Applies a partial update to a club
    ///
    /// Only the supplied fields are written. An explicitly-supplied blank
    /// `location` is replaced with [`LOCATION_PLACEHOLDER`] before binding.
    ///
    /// # Returns
    ///
    /// The updated club, or `None` when no row matched the ID — callers map
    /// that to a not-found error, distinct from a database failure.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateClub,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE clubs SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.location.is_some() {
            bind_count += 1;
            query.push_str(&format!(", location = ${}", bind_count));
        }
        if data.address.is_some() {
            bind_count += 1;
            query.push_str(&format!(", address = ${}", bind_count));
        }
        if data.latitude.is_some() {
            bind_count += 1;
            query.push_str(&format!(", latitude = ${}", bind_count));
        }
        if data.longitude.is_some() {
            bind_count += 1;
            query.push_str(&format!(", longitude = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {CLUB_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Club>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(location) = data.location {
            q = q.bind(normalize_location(&location));
        }
        if let Some(address) = data.address {
            q = q.bind(address);
        }
        if let Some(latitude) = data.latitude {
            q = q.bind(latitude);
        }
        if let Some(longitude) = data.longitude {
            q = q.bind(longitude);
        }

        let club = q.fetch_optional(pool).await?;

        Ok(club)
    }

    /// Deletes the club row itself
    ///
    /// This does not touch dependent rows; cascade deletion is handled by
    /// the strategies in [`crate::deletion`]. Returns `true` when a row was
    /// removed, `false` when the club was already gone.
    pub async fn delete_row(executor: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all clubs
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clubs")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
