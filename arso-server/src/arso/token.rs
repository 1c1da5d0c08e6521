//! Opaque station identifiers.

/// Derive the opaque lookup token for a raw upstream station identifier.
///
/// Lowercase 32-character hex MD5 digest. The token only exists to keep
/// the raw upstream identifier out of our URLs and to give each station a
/// stable, URL-safe address; it is not a security mechanism. MD5 is kept
/// so tokens stay stable for consumers that already hold them.
pub fn station_token(raw: &str) -> String {
    format!("{:x}", md5::compute(raw))
}
