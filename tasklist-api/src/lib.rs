//! # Tasklist API Server Library
//!
//! A session-gated to-do web service: JSON endpoints for todos and
//! authentication plus a few server-rendered pages.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Session gate and security headers
//! - `routes`: Route handlers
//! - `session`: Session cookie and identity extractors
//! - `views`: HTML rendering

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod views;
