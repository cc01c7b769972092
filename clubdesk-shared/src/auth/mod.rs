/// Authentication utilities
///
/// Primitives for the admin console's session handling:
///
/// - [`password`]: Argon2id password hashing and strength validation
/// - [`jwt`]: HS256 token generation and validation
/// - [`middleware`]: Axum middleware gating the protected routes
///
/// Every data route requires a valid access token; there is no anonymous
/// surface beyond health and the auth endpoints themselves.

pub mod jwt;
pub mod middleware;
pub mod password;
