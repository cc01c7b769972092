/// Club management endpoints
///
/// - `GET    /v1/clubs` - List all clubs, newest first
/// - `POST   /v1/clubs` - Create a club
/// - `GET    /v1/clubs/:id` - Fetch one club
/// - `PUT    /v1/clubs/:id` - Partially update a club
/// - `DELETE /v1/clubs/:id` - Delete a club and all dependent rows

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use clubdesk_shared::{
    auth::middleware::AuthContext,
    deletion,
    models::{
        club::{Club, CreateClub, UpdateClub},
        membership::{ClubMembership, CreateMembership, MemberRole, MemberStatus},
    },
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Create club request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClubRequest {
    /// Display name
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    /// City/country label
    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: String,

    /// Optional street address
    pub address: Option<String>,

    /// Latitude (supply with longitude or not at all)
    pub latitude: Option<f64>,

    /// Longitude (supply with latitude or not at all)
    pub longitude: Option<f64>,
}

/// Update club request; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateClubRequest {
    /// New display name
    pub name: Option<String>,

    /// New location label; blank values are stored as the placeholder
    pub location: Option<String>,

    /// New street address
    pub address: Option<String>,

    /// New latitude
    pub latitude: Option<f64>,

    /// New longitude
    pub longitude: Option<f64>,
}

/// Rejects a half-specified coordinate pair
fn check_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), ApiError> {
    if latitude.is_some() != longitude.is_some() {
        return Err(ApiError::BadRequest(
            "Latitude and longitude must be supplied together".to_string(),
        ));
    }
    Ok(())
}

/// Lists all clubs, newest first
pub async fn list_clubs(State(state): State<AppState>) -> ApiResult<Json<Vec<Club>>> {
    let clubs = Club::list(&state.db).await?;
    Ok(Json(clubs))
}

/// Fetches one club by ID
pub async fn get_club(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Club>> {
    let club = Club::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Club {id} not found")))?;

    Ok(Json(club))
}

/// Creates a club and enrolls the creator as its owner
///
/// The owner membership is a best-effort side effect: when the insert
/// fails the club still exists and the response succeeds, with the
/// failure logged for later repair.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `400 Bad Request`: Half-specified coordinates
pub async fn create_club(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateClubRequest>,
) -> ApiResult<(StatusCode, Json<Club>)> {
    req.validate().map_err(super::validation_details)?;

    check_coordinates(req.latitude, req.longitude)?;

    let club = Club::create(
        &state.db,
        CreateClub {
            name: req.name,
            location: req.location,
            address: req.address,
            latitude: req.latitude,
            longitude: req.longitude,
        },
    )
    .await?;

    // The club creation already succeeded, so a membership failure is
    // logged but not surfaced to the caller.
    let membership = ClubMembership::create(
        &state.db,
        CreateMembership {
            club_id: club.id,
            user_id: auth.user_id,
            role: MemberRole::Owner,
            status: MemberStatus::Active,
        },
    )
    .await;

    if let Err(err) = membership {
        warn!(
            club_id = %club.id,
            user_id = %auth.user_id,
            error = %err,
            "Failed to enroll creator as club owner"
        );
    }

    info!(club_id = %club.id, name = %club.name, "Club created");

    Ok((StatusCode::CREATED, Json(club)))
}

/// Partially updates a club
///
/// Only the fields present in the request change. A blank location is
/// stored as the "Non spécifié" placeholder rather than violating the
/// non-empty constraint.
///
/// # Errors
///
/// - `404 Not Found`: No club with this ID
/// - `400 Bad Request`: Half-specified coordinates
pub async fn update_club(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClubRequest>,
) -> ApiResult<Json<Club>> {
    check_coordinates(req.latitude, req.longitude)?;

    let club = Club::update(
        &state.db,
        id,
        UpdateClub {
            name: req.name,
            location: req.location,
            address: req.address,
            latitude: req.latitude,
            longitude: req.longitude,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Club {id} not found")))?;

    Ok(Json(club))
}

/// Deletes a club together with all dependent rows
///
/// Matches, participants, memberships, and user links go with it, and
/// preferred-club references are cleared. Deleting an already-deleted
/// club succeeds, so retries are safe.
pub async fn delete_club(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    deletion::delete_club(&state.db, id).await?;

    info!(club_id = %id, "Club deleted");

    Ok(StatusCode::NO_CONTENT)
}
