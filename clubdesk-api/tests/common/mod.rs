/// Common test utilities for integration tests
///
/// Shared infrastructure for the database-backed tests:
/// - Test database setup (runs migrations)
/// - Test administrator creation
/// - JWT token generation
/// - Router construction with a disabled places backend
///
/// These tests need `DATABASE_URL` pointing at a disposable PostgreSQL
/// instance and run with `cargo test -- --ignored`.

use clubdesk_api::app::{build_router, AppState};
use clubdesk_api::config::Config;
use clubdesk_shared::auth::jwt::{create_token, Claims, TokenType};
use clubdesk_shared::models::profile::{CreateProfile, Profile};
use clubdesk_shared::places::{GooglePlacesClient, PlacesConfig};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: Profile,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context with a migrated database
    pub async fn new() -> anyhow::Result<Self> {
        if std::env::var("JWT_SECRET").is_err() {
            std::env::set_var("JWT_SECRET", "integration-test-secret-0123456789abcdef");
        }

        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path relative to this crate's Cargo.toml
        sqlx::migrate!("../clubdesk-shared/migrations").run(&db).await?;

        // Create test administrator
        let user = Profile::create(
            &db,
            CreateProfile {
                email: format!("test-{}@example.com", Uuid::new_v4()),
                password_hash: "test_hash".to_string(), // Not used in these tests
                name: Some("Test Admin".to_string()),
            },
        )
        .await?;

        // Generate JWT token
        let claims = Claims::new(user.id, TokenType::Access);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        // Build app with places lookup disabled
        let places = Arc::new(GooglePlacesClient::new(PlacesConfig {
            api_key: None,
            base_url: PlacesConfig::DEFAULT_BASE_URL.to_string(),
        }));
        let state = AppState::new(db.clone(), config.clone(), places);
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            jwt_token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Cleans up test data created by this context
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(self.user.id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Helper to create a club directly in the database
pub async fn create_test_club(ctx: &TestContext, name: &str) -> anyhow::Result<Uuid> {
    use clubdesk_shared::models::club::{Club, CreateClub};

    let club = Club::create(
        &ctx.db,
        CreateClub {
            name: name.to_string(),
            location: "Lyon, France".to_string(),
            address: None,
            latitude: Some(45.764043),
            longitude: Some(4.835659),
        },
    )
    .await?;

    Ok(club.id)
}
