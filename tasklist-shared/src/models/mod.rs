/// Database models
///
/// Each model owns its SQL as associated functions taking a `PgPool` (or
/// any executor where a transaction is needed).
///
/// - `user`: registered people and the admin flag
/// - `account`: credential records (Argon2id hashes)
/// - `session`: cookie-backed sign-in sessions
/// - `todo`: user-owned tasks, always queried with an ownership filter

pub mod account;
pub mod session;
pub mod todo;
pub mod user;
