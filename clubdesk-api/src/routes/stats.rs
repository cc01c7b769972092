/// Dashboard statistics endpoint
///
/// - `GET /v1/stats` - The full statistics payload in one response
///
/// The aggregation itself lives in `clubdesk_shared::stats`; this handler
/// only maps it onto HTTP.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use clubdesk_shared::stats::{self, Statistics};

/// Returns every figure the dashboard renders
///
/// # Response
///
/// ```json
/// {
///   "totalUsers": 120,
///   "totalClubs": 8,
///   "matchesThisWeek": 3,
///   "usersByMonth": [ { "month": "janv. 2026", "count": 12 }, ... ],
///   ...
/// }
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: "Failed to fetch statistics" (the
///   underlying query failure is only logged)
pub async fn get_statistics(State(state): State<AppState>) -> ApiResult<Json<Statistics>> {
    let statistics = stats::gather(&state.db).await?;
    Ok(Json(statistics))
}
