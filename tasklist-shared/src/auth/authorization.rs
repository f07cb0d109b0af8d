/// Access policy for pages
///
/// One function, [`evaluate`], decides whether a page request may proceed.
/// The session gate calls it for every gated page and the admin page only
/// renders what the gate granted, so there is a single place where the
/// admin rule lives.
///
/// # Rules
///
/// 1. Public paths (`/`, `/login`, `/register`, `/api/**`, `/static/**`,
///    `/health`) are always granted. The API answers 401 on its own.
/// 2. Any other path needs a resolved session.
/// 3. Paths under [`ADMIN_PREFIX`] additionally need `is_admin`.
///
/// ```
/// use tasklist_shared::auth::authorization::{evaluate, Access};
///
/// assert_eq!(evaluate("/admin", None), Access::Unauthenticated);
/// assert_eq!(evaluate("/login", None), Access::Granted);
/// ```

use super::session::AuthContext;

/// Prefix of the admin-only area
pub const ADMIN_PREFIX: &str = "/admin";

/// Where unauthenticated page requests are sent
pub const LOGIN_PATH: &str = "/login";

const PUBLIC_PATHS: &[&str] = &["/", "/login", "/register", "/health", "/favicon.ico"];
const PUBLIC_PREFIXES: &[&str] = &["/api", "/static"];

/// Outcome of a policy check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Proceed to the handler
    Granted,

    /// No valid session; send to the login page
    Unauthenticated,

    /// Signed in but not allowed here
    Forbidden,
}

/// True when `path` equals `prefix` or continues it with a `/` segment
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// `/admin` and everything below it, but not `/administrator`
pub fn is_admin_path(path: &str) -> bool {
    has_segment_prefix(path, ADMIN_PREFIX)
}

/// Whether a page at `path` needs a session at all
pub fn requires_session(path: &str) -> bool {
    if PUBLIC_PATHS.contains(&path) {
        return false;
    }

    !PUBLIC_PREFIXES
        .iter()
        .any(|prefix| has_segment_prefix(path, prefix))
}

/// Decides access to `path` for an optional resolved identity
pub fn evaluate(path: &str, identity: Option<&AuthContext>) -> Access {
    if !requires_session(path) {
        return Access::Granted;
    }

    match identity {
        None => Access::Unauthenticated,
        Some(context) if is_admin_path(path) && !context.is_admin() => Access::Forbidden,
        Some(_) => Access::Granted,
    }
}
