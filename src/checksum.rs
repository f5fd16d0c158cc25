//! Content digests for version tokens and integrity attributes.
//!
//! Two digests are in play:
//! - a truncated SHA-1 hex fingerprint used as the `v=` cache-busting
//!   token (not a security primitive)
//! - a full SHA-384 base64 digest embedded as the subresource-integrity
//!   payload

use base64::prelude::{BASE64_STANDARD, Engine as _};
use sha1::{Digest, Sha1};
use sha2::{Sha256, Sha384, Sha512};

/// Number of hex characters kept for the cache-busting token.
pub const TOKEN_LEN: usize = 10;

/// Digest algorithms available for asset hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

/// Output encodings for a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestEncoding {
    Hex,
    Base64,
}

/// Compute a digest of `content` under the given algorithm and encoding.
///
/// Deterministic, no side effects.
pub fn digest(content: &[u8], algorithm: Algorithm, encoding: DigestEncoding) -> String {
    let bytes = match algorithm {
        Algorithm::Sha1 => Sha1::digest(content).to_vec(),
        Algorithm::Sha256 => Sha256::digest(content).to_vec(),
        Algorithm::Sha384 => Sha384::digest(content).to_vec(),
        Algorithm::Sha512 => Sha512::digest(content).to_vec(),
    };
    match encoding {
        DigestEncoding::Hex => hex::encode(bytes),
        DigestEncoding::Base64 => BASE64_STANDARD.encode(bytes),
    }
}

/// Compute the short cache-busting token for an asset's content.
///
/// First 10 hex chars of the SHA-1 digest. Same content always yields
/// the same token; a content change yields a different one.
#[inline]
pub fn fingerprint(content: &[u8]) -> String {
    let mut token = digest(content, Algorithm::Sha1, DigestEncoding::Hex);
    token.truncate(TOKEN_LEN);
    token
}

/// Compute the subresource-integrity payload for an asset's content.
///
/// Returns `sha384-<base64 digest>`, the form browsers expect in an
/// `integrity` attribute.
#[inline]
pub fn integrity(content: &[u8]) -> String {
    format!(
        "sha384-{}",
        digest(content, Algorithm::Sha384, DigestEncoding::Base64)
    )
}
