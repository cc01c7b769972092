//! # ClubDesk API Server
//!
//! Admin backend for padel club management: authentication, club CRUD
//! with cascade deletion, dashboard statistics, and address suggestions.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p clubdesk-api
//! ```

use clubdesk_api::{
    app::{build_router, AppState},
    config::Config,
};
use clubdesk_shared::{
    db::{
        migrations::run_migrations,
        pool::{create_pool, DatabaseConfig},
    },
    places::GooglePlacesClient,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clubdesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "ClubDesk API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&db).await?;

    if !config.places.is_enabled() {
        tracing::warn!("GOOGLE_PLACES_API_KEY not set, address suggestions are disabled");
    }
    let places = Arc::new(GooglePlacesClient::new(config.places.clone()));

    let bind_address = config.bind_address();
    let state = AppState::new(db, config, places);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
