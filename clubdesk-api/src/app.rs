/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with
/// all routes and middleware.

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use clubdesk_shared::{auth::middleware::create_jwt_middleware, places::PlaceLookup};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Address suggestion backend
    pub places: Arc<dyn PlaceLookup>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config, places: Arc<dyn PlaceLookup>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            places,
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                     # Health check (public)
/// ├── /v1/
/// │   ├── /auth/                  # Authentication (public)
/// │   │   ├── POST /register
/// │   │   ├── POST /login
/// │   │   └── POST /refresh
/// │   ├── /clubs/                 # Club management (authenticated)
/// │   │   ├── GET    /
/// │   │   ├── POST   /
/// │   │   ├── GET    /:id
/// │   │   ├── PUT    /:id
/// │   │   └── DELETE /:id
/// │   ├── /stats                  # Dashboard statistics (authenticated)
/// │   │   └── GET    /
/// │   └── /places/                # Address lookup (authenticated)
/// │       ├── GET /suggest
/// │       └── GET /resolve/:place_id
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    let jwt_layer = axum::middleware::from_fn(create_jwt_middleware(state.jwt_secret().to_string()));

    // Club management routes (require JWT authentication)
    let club_routes = Router::new()
        .route("/", get(routes::clubs::list_clubs))
        .route("/", post(routes::clubs::create_club))
        .route("/:id", get(routes::clubs::get_club))
        .route("/:id", put(routes::clubs::update_club))
        .route("/:id", delete(routes::clubs::delete_club))
        .layer(jwt_layer.clone());

    // Dashboard statistics (require JWT authentication)
    let stats_routes = Router::new()
        .route("/", get(routes::stats::get_statistics))
        .layer(jwt_layer.clone());

    // Address lookup (require JWT authentication)
    let places_routes = Router::new()
        .route("/suggest", get(routes::places::suggest))
        .route("/resolve/:place_id", get(routes::places::resolve))
        .layer(jwt_layer);

    // Build complete v1 API
    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/clubs", club_routes)
        .nest("/stats", stats_routes)
        .nest("/places", places_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
