/// Authentication and authorization
///
/// - [`password`]: Argon2id hashing and password rules
/// - [`token`]: opaque session tokens and their SHA-256 digests
/// - [`session`]: opening, resolving and closing sessions
/// - [`authorization`]: the page access policy used by the session gate
///
/// # Example
///
/// ```no_run
/// use chrono::Duration;
/// use tasklist_shared::auth::session::{open_session, resolve_session, ClientInfo};
/// use tasklist_shared::store::MemoryStore;
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let opened = open_session(&store, user_id, Duration::days(7), ClientInfo::default()).await?;
/// let context = resolve_session(&store, &opened.token).await?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod password;
pub mod session;
pub mod token;
