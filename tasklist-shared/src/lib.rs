//! # Tasklist Shared Library
//!
//! Types and logic shared by the Tasklist API server and the seed tool.
//!
//! ## Module Organization
//!
//! - `models`: row types and their SQL
//! - `store`: the `Store` trait with PostgreSQL and in-memory implementations
//! - `auth`: passwords, session tokens, session resolution, access policy
//! - `db`: connection pool and embedded migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
