/// Address suggestion endpoints
///
/// - `GET /v1/places/suggest?input=...` - Address suggestions
/// - `GET /v1/places/resolve/:place_id` - Coordinates for a suggestion
///
/// Lookup is a convenience on top of free-text locations, so these
/// endpoints degrade instead of failing: a missing API key or an
/// unreachable service produces an empty 200 response with an inline
/// status, and the club form keeps working with manual input.

use crate::app::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use clubdesk_shared::places::{PlacesError, ResolvedPlace, Suggestion};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Lookup availability reported inline with each response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    /// The service answered normally
    Ok,

    /// No API key is configured on this instance
    Disabled,

    /// The service could not be reached or refused the request
    Unavailable,

    /// The place ID did not resolve to anything
    NotFound,
}

/// Suggest query parameters
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    /// Partial address input
    pub input: String,
}

/// Suggest response
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    /// Lookup availability
    pub status: LookupStatus,

    /// Suggestions, empty unless status is "ok"
    pub suggestions: Vec<Suggestion>,
}

/// Resolve response
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    /// Lookup availability
    pub status: LookupStatus,

    /// The resolved place, present only when status is "ok"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<ResolvedPlace>,
}

fn degraded_status(err: &PlacesError) -> LookupStatus {
    match err {
        PlacesError::MissingApiKey => LookupStatus::Disabled,
        PlacesError::Http(_) | PlacesError::Status { .. } => LookupStatus::Unavailable,
    }
}

/// Suggests addresses for a partial input
///
/// Always returns 200; lookup problems show up as an empty suggestion
/// list with a non-"ok" status.
pub async fn suggest(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Json<SuggestResponse> {
    match state.places.suggest(&params.input).await {
        Ok(suggestions) => Json(SuggestResponse {
            status: LookupStatus::Ok,
            suggestions,
        }),
        Err(err) => {
            if !matches!(err, PlacesError::MissingApiKey) {
                warn!(error = %err, "Address suggestion lookup failed");
            }
            Json(SuggestResponse {
                status: degraded_status(&err),
                suggestions: Vec::new(),
            })
        }
    }
}

/// Resolves a place ID into coordinates and a display label
pub async fn resolve(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Json<ResolveResponse> {
    match state.places.resolve(&place_id).await {
        Ok(Some(place)) => Json(ResolveResponse {
            status: LookupStatus::Ok,
            place: Some(place),
        }),
        Ok(None) => Json(ResolveResponse {
            status: LookupStatus::NotFound,
            place: None,
        }),
        Err(err) => {
            if !matches!(err, PlacesError::MissingApiKey) {
                warn!(error = %err, place_id = %place_id, "Place resolution failed");
            }
            Json(ResolveResponse {
                status: degraded_status(&err),
                place: None,
            })
        }
    }
}
