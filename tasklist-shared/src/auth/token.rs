/// Opaque session tokens
///
/// A token is 32 random base62 characters. The browser keeps the plaintext
/// in its cookie; the database keeps only the SHA-256 hex digest, so a
/// leaked `sessions` table cannot be replayed.
///
/// ```
/// use tasklist_shared::auth::token::{generate_session_token, hash_session_token, is_well_formed};
///
/// let (token, digest) = generate_session_token();
/// assert!(is_well_formed(&token));
/// assert_eq!(hash_session_token(&token), digest);
/// ```

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a session token in characters
pub const SESSION_TOKEN_LENGTH: usize = 32;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Returns a fresh `(token, sha256_hex_digest)` pair
pub fn generate_session_token() -> (String, String) {
    let mut rng = rand::thread_rng();
    let token: String = (0..SESSION_TOKEN_LENGTH)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    let digest = hash_session_token(&token);

    (token, digest)
}

/// SHA-256 hex digest of a token (64 characters)
pub fn hash_session_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Cheap shape check before touching the store
pub fn is_well_formed(token: &str) -> bool {
    token.len() == SESSION_TOKEN_LENGTH && token.bytes().all(|b| b.is_ascii_alphanumeric())
}
