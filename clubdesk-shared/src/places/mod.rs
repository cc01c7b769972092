/// Geocoding lookup for club locations
///
/// Club locations are free text, but the form offers address suggestions
/// backed by the Google Places web service. [`PlaceLookup`] is the seam:
/// handlers depend on the trait, [`GooglePlacesClient`] is the production
/// implementation, and tests substitute a stub server.
///
/// Lookup is strictly optional. An instance without an API key still
/// accepts manually typed locations; the suggestion endpoints then return
/// empty results with an inline status instead of failing.

pub mod client;

pub use client::GooglePlacesClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of suggestions returned for one input
pub const MAX_SUGGESTIONS: usize = 5;

/// Minimum input length (in characters) before suggestions are fetched
pub const MIN_INPUT_CHARS: usize = 3;

/// Configuration for the places client
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// Google Places API key; absent keys disable lookups
    pub api_key: Option<String>,

    /// Base URL of the Places web service (overridden in tests)
    pub base_url: String,
}

impl PlacesConfig {
    /// Default Google Places web service base URL
    pub const DEFAULT_BASE_URL: &'static str = "https://maps.googleapis.com/maps/api/place";

    /// Loads configuration from environment variables
    ///
    /// - `GOOGLE_PLACES_API_KEY`: optional API key
    /// - `PLACES_BASE_URL`: optional base URL override
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GOOGLE_PLACES_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("PLACES_BASE_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
        }
    }

    /// True when lookups can actually reach the web service
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Error type for place lookups
#[derive(Debug, Error)]
pub enum PlacesError {
    /// No API key is configured
    #[error("Places API key is not configured")]
    MissingApiKey,

    /// The HTTP request failed
    #[error("Places request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The web service answered with a non-success status
    #[error("Places API returned status '{status}'")]
    Status {
        /// Status string from the service, e.g. "REQUEST_DENIED"
        status: String,
    },
}

/// One address suggestion for an input prefix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Primary display text, e.g. "Lyon"
    pub label: String,

    /// Secondary display text shown below the label, e.g. "France"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_label: Option<String>,

    /// Opaque place ID to pass to [`PlaceLookup::resolve`]
    pub place_id: String,
}

/// A fully resolved place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedPlace {
    /// Short display label, "City, Country" when both are known,
    /// otherwise the formatted address
    pub label: String,

    /// Full formatted address from the service
    pub formatted_address: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,
}

/// Address suggestion and resolution backend
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// Suggests addresses for a partial input
    ///
    /// Inputs shorter than [`MIN_INPUT_CHARS`] return no suggestions
    /// without contacting the service. At most [`MAX_SUGGESTIONS`]
    /// entries come back.
    async fn suggest(&self, input: &str) -> Result<Vec<Suggestion>, PlacesError>;

    /// Resolves a place ID into coordinates and a display label
    ///
    /// Unknown place IDs resolve to `Ok(None)`.
    async fn resolve(&self, place_id: &str) -> Result<Option<ResolvedPlace>, PlacesError>;
}
