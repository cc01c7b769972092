/// Google Places web service client
///
/// Talks to the Autocomplete and Details endpoints of the Places API.
/// Requests are restricted to geocoding results in France, matching the
/// audience of the admin console.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{
    PlaceLookup, PlacesConfig, PlacesError, ResolvedPlace, Suggestion, MAX_SUGGESTIONS,
    MIN_INPUT_CHARS,
};

/// Country restriction applied to every autocomplete request
const COUNTRY_COMPONENTS: &str = "country:fr";

/// Result types requested from autocomplete
const RESULT_TYPES: &str = "geocode";

/// Production [`PlaceLookup`] implementation
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    http: reqwest::Client,
    config: PlacesConfig,
}

impl GooglePlacesClient {
    /// Creates a client from configuration
    pub fn new(config: PlacesConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn api_key(&self) -> Result<&str, PlacesError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(PlacesError::MissingApiKey)
    }
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    description: String,
    place_id: String,
    structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Deserialize)]
struct StructuredFormatting {
    main_text: Option<String>,
    secondary_text: Option<String>,
}

impl Prediction {
    /// Splits the prediction into primary and secondary display text
    ///
    /// Predictions without `structured_formatting` fall back to the full
    /// description as the primary text.
    fn into_suggestion(self) -> Suggestion {
        let (main_text, secondary_text) = match self.structured_formatting {
            Some(formatting) => (formatting.main_text, formatting.secondary_text),
            None => (None, None),
        };

        Suggestion {
            label: main_text.unwrap_or(self.description),
            secondary_label: secondary_text,
            place_id: self.place_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetails {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Picks the display label for a resolved place
///
/// Prefers "City, Country" built from the locality (falling back to the
/// administrative area) and country components. When either half is
/// missing, the full formatted address is used instead.
fn display_label(components: &[AddressComponent], formatted_address: &str) -> String {
    let component_of = |kind: &str| {
        components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
            .map(|c| c.long_name.as_str())
    };

    let city = component_of("locality").or_else(|| component_of("administrative_area_level_1"));
    let country = component_of("country");

    match (city, country) {
        (Some(city), Some(country)) => format!("{city}, {country}"),
        _ => formatted_address.to_string(),
    }
}

#[async_trait]
impl PlaceLookup for GooglePlacesClient {
    async fn suggest(&self, input: &str) -> Result<Vec<Suggestion>, PlacesError> {
        if input.chars().count() < MIN_INPUT_CHARS {
            return Ok(Vec::new());
        }

        let key = self.api_key()?;
        let url = format!("{}/autocomplete/json", self.config.base_url);

        debug!(input_len = input.len(), "Fetching address suggestions");

        let response: AutocompleteResponse = self
            .http
            .get(&url)
            .query(&[
                ("input", input),
                ("components", COUNTRY_COMPONENTS),
                ("types", RESULT_TYPES),
                ("key", key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(response
                .predictions
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .map(Prediction::into_suggestion)
                .collect()),
            status => Err(PlacesError::Status {
                status: status.to_string(),
            }),
        }
    }

    async fn resolve(&self, place_id: &str) -> Result<Option<ResolvedPlace>, PlacesError> {
        let key = self.api_key()?;
        let url = format!("{}/details/json", self.config.base_url);

        debug!(place_id = %place_id, "Resolving place details");

        let response: DetailsResponse = self
            .http
            .get(&url)
            .query(&[
                ("place_id", place_id),
                ("fields", "address_component,formatted_address,geometry"),
                ("key", key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match (response.status.as_str(), response.result) {
            ("OK", Some(details)) => {
                let label = display_label(&details.address_components, &details.formatted_address);
                Ok(Some(ResolvedPlace {
                    label,
                    formatted_address: details.formatted_address,
                    latitude: details.geometry.location.lat,
                    longitude: details.geometry.location.lng,
                }))
            }
            ("ZERO_RESULTS", _) | ("NOT_FOUND", _) => Ok(None),
            (status, _) => Err(PlacesError::Status {
                status: status.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(long_name: &str, kind: &str) -> AddressComponent {
        AddressComponent {
            long_name: long_name.to_string(),
            types: vec![kind.to_string()],
        }
    }

    #[test]
    fn test_display_label_prefers_locality() {
        let components = vec![
            component("Lyon", "locality"),
            component("Auvergne-Rhône-Alpes", "administrative_area_level_1"),
            component("France", "country"),
        ];

        assert_eq!(display_label(&components, "Lyon, France"), "Lyon, France");
    }

    #[test]
    fn test_display_label_falls_back_to_administrative_area() {
        let components = vec![
            component("Bretagne", "administrative_area_level_1"),
            component("France", "country"),
        ];

        assert_eq!(display_label(&components, "unused"), "Bretagne, France");
    }

    #[test]
    fn test_display_label_uses_formatted_address_without_country() {
        let components = vec![component("Paris", "locality")];

        assert_eq!(
            display_label(&components, "12 Rue de Rivoli, 75001 Paris"),
            "12 Rue de Rivoli, 75001 Paris"
        );
    }

    #[test]
    fn test_prediction_splits_structured_formatting() {
        let prediction = Prediction {
            description: "Lyon, France".to_string(),
            place_id: "place-lyon".to_string(),
            structured_formatting: Some(StructuredFormatting {
                main_text: Some("Lyon".to_string()),
                secondary_text: Some("France".to_string()),
            }),
        };

        let suggestion = prediction.into_suggestion();
        assert_eq!(suggestion.label, "Lyon");
        assert_eq!(suggestion.secondary_label.as_deref(), Some("France"));
        assert_eq!(suggestion.place_id, "place-lyon");
    }

    #[test]
    fn test_prediction_without_formatting_uses_description() {
        let prediction = Prediction {
            description: "Lyon, France".to_string(),
            place_id: "place-lyon".to_string(),
            structured_formatting: None,
        };

        let suggestion = prediction.into_suggestion();
        assert_eq!(suggestion.label, "Lyon, France");
        assert_eq!(suggestion.secondary_label, None);
    }

    #[tokio::test]
    async fn test_suggest_short_input_skips_request() {
        let client = GooglePlacesClient::new(PlacesConfig {
            api_key: Some("key".to_string()),
            // Unroutable on purpose: the call must not be made
            base_url: "http://127.0.0.1:1/place".to_string(),
        });

        let suggestions = client.suggest("Ly").await.unwrap();
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_suggest_without_key_fails() {
        let client = GooglePlacesClient::new(PlacesConfig {
            api_key: None,
            base_url: "http://127.0.0.1:1/place".to_string(),
        });

        let result = client.suggest("Lyon").await;
        assert!(matches!(result, Err(PlacesError::MissingApiKey)));
    }
}
