/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, refresh)
/// - `clubs`: Club management endpoints
/// - `stats`: Dashboard statistics endpoint
/// - `places`: Address suggestion endpoints

pub mod auth;
pub mod clubs;
pub mod health;
pub mod places;
pub mod stats;

use crate::error::{ApiError, ValidationErrorDetail};

/// Maps `validator` failures into the API's validation error shape
pub(crate) fn validation_details(errors: validator::ValidationErrors) -> ApiError {
    let details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::ValidationError(details)
}
