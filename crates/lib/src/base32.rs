//! Base32 rendering of secret key material.
//!
//! Authenticator apps exchange secrets as RFC 4648 base32 text. Output
//! is always uppercase and unpadded; input is forgiving, since it is
//! typed by hand: lowercase letters, interior whitespace (space-grouped
//! manual-entry codes), and trailing `=` padding are all accepted.

use data_encoding::BASE32_NOPAD;

use crate::Result;

/// Encodes raw bytes as unpadded uppercase base32.
pub fn encode(bytes: &[u8]) -> String {
    BASE32_NOPAD.encode(bytes)
}

/// Decodes base32 text back into bytes.
///
/// Characters outside the RFC 4648 alphabet (after normalization) are
/// a [`crate::OtpError::MalformedSecret`] error. Law: `decode(encode(b)) == b`.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let normalized = normalized.trim_end_matches('=');
    Ok(BASE32_NOPAD.decode(normalized.as_bytes())?)
}
