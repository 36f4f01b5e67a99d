//! Deterministic short alias derivation.
//!
//! An alias is the first [`ALIAS_LENGTH`] characters of the URL-safe base64
//! encoding (no padding) of `SHA-256(url ++ request_id)`.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Number of characters kept from the encoded digest.
pub const ALIAS_LENGTH: usize = 11;

/// Derives the short alias for `url` within the request identified by `request_id`.
///
/// The request ID is mixed into the hash so that concurrent submissions of the
/// same URL produce different candidates; the storage layer's uniqueness on the
/// original URL decides which one is kept.
///
/// # Examples
///
/// ```
/// use shortlink::utils::alias::{ALIAS_LENGTH, generate_alias};
///
/// let alias = generate_alias("https://example.com", "req-1");
/// assert_eq!(alias.len(), ALIAS_LENGTH);
/// assert_eq!(alias, generate_alias("https://example.com", "req-1"));
/// ```
pub fn generate_alias(url: &str, request_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(request_id.as_bytes());
    let digest = hasher.finalize();

    let mut encoded = URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(ALIAS_LENGTH);
    encoded
}

/// Returns true if `candidate` has the shape of a generated alias.
///
/// Used by the redirect handler to skip a database round trip for paths that
/// can never match.
pub fn is_well_formed(candidate: &str) -> bool {
    candidate.len() == ALIAS_LENGTH
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
