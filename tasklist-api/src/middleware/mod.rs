/// Middleware modules for the API server
///
/// - `security`: static security headers on every response
/// - `session_gate`: session resolution and access policy for pages

pub mod security;
pub mod session_gate;
