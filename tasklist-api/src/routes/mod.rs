/// Route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Sign-up, sign-in, sign-out, current session
/// - `todos`: Todo CRUD scoped to the caller
/// - `pages`: HTML pages behind the session gate
/// - `assets`: Static script

pub mod assets;
pub mod auth;
pub mod health;
pub mod pages;
pub mod todos;
