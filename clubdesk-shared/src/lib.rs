//! # Clubdesk Shared Library
//!
//! This crate contains the data layer and business logic shared by the
//! Clubdesk API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `db`: Connection pool and migration runner
//! - `auth`: JWT tokens, password hashing, request authentication
//! - `deletion`: Cascade deletion strategies for clubs
//! - `stats`: Platform statistics aggregation
//! - `places`: Google Places suggestion/resolution client

pub mod auth;
pub mod db;
pub mod deletion;
pub mod models;
pub mod places;
pub mod stats;

/// Current version of the Clubdesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
