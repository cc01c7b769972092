/// Database models for Clubdesk
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `club`: Club (venue) records, the primary administrative entity
/// - `membership`: User-club memberships with roles (owner/member)
/// - `profile`: Platform users, also the authentication principals
/// - `match_record`: Matches and their participants (modeled as far as
///   cascade deletion and statistics require)
/// - `user_club`: The user-to-club favourites linking table
///
/// # Example
///
/// ```no_run
/// use clubdesk_shared::models::club::{Club, CreateClub};
/// use clubdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let club = Club::create(&pool, CreateClub {
///     name: "Padel Club Paris".to_string(),
///     location: "Paris, France".to_string(),
///     address: None,
///     latitude: None,
///     longitude: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod club;
pub mod match_record;
pub mod membership;
pub mod profile;
pub mod user_club;
