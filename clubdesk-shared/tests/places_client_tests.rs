//! Places client tests against a stub web service

use clubdesk_shared::places::{
    GooglePlacesClient, PlaceLookup, PlacesConfig, PlacesError, MAX_SUGGESTIONS,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GooglePlacesClient {
    GooglePlacesClient::new(PlacesConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
    })
}

#[tokio::test]
async fn suggest_returns_predictions_restricted_to_france() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/autocomplete/json"))
        .and(query_param("input", "Lyon"))
        .and(query_param("components", "country:fr"))
        .and(query_param("types", "geocode"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "predictions": [
                {
                    "description": "Lyon, France",
                    "place_id": "place-lyon",
                    "structured_formatting": {
                        "main_text": "Lyon",
                        "secondary_text": "France"
                    }
                },
                { "description": "Lyon 2e Arrondissement, France", "place_id": "place-lyon-2" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let suggestions = client_for(&server).suggest("Lyon").await.unwrap();

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].label, "Lyon");
    assert_eq!(suggestions[0].secondary_label.as_deref(), Some("France"));
    assert_eq!(suggestions[0].place_id, "place-lyon");

    // Predictions without structured formatting keep the full description
    assert_eq!(suggestions[1].label, "Lyon 2e Arrondissement, France");
    assert_eq!(suggestions[1].secondary_label, None);
}

#[tokio::test]
async fn suggest_caps_predictions() {
    let server = MockServer::start().await;

    let predictions: Vec<_> = (0..10)
        .map(|i| json!({ "description": format!("Place {i}"), "place_id": format!("id-{i}") }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/autocomplete/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "predictions": predictions
        })))
        .mount(&server)
        .await;

    let suggestions = client_for(&server).suggest("Place").await.unwrap();

    assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
}

#[tokio::test]
async fn suggest_treats_zero_results_as_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/autocomplete/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "predictions": []
        })))
        .mount(&server)
        .await;

    let suggestions = client_for(&server).suggest("Nowhere").await.unwrap();
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn suggest_surfaces_service_denial() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/autocomplete/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "predictions": []
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).suggest("Lyon").await;

    match result {
        Err(PlacesError::Status { status }) => assert_eq!(status, "REQUEST_DENIED"),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn resolve_builds_city_country_label() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "place-lyon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "address_components": [
                    { "long_name": "Lyon", "short_name": "Lyon", "types": ["locality", "political"] },
                    { "long_name": "France", "short_name": "FR", "types": ["country", "political"] }
                ],
                "formatted_address": "Lyon, France",
                "geometry": { "location": { "lat": 45.764043, "lng": 4.835659 } }
            }
        })))
        .mount(&server)
        .await;

    let place = client_for(&server)
        .resolve("place-lyon")
        .await
        .unwrap()
        .expect("place should resolve");

    assert_eq!(place.label, "Lyon, France");
    assert_eq!(place.formatted_address, "Lyon, France");
    assert!((place.latitude - 45.764043).abs() < 1e-9);
    assert!((place.longitude - 4.835659).abs() < 1e-9);
}

#[tokio::test]
async fn resolve_unknown_place_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "NOT_FOUND"
        })))
        .mount(&server)
        .await;

    let place = client_for(&server).resolve("missing").await.unwrap();
    assert!(place.is_none());
}
