//! Time-based one-time passcodes (RFC 6238).
//!
//! A TOTP is an HOTP whose counter is the number of fixed-length time
//! steps elapsed since the Unix epoch. Validation tolerates clock drift
//! between server and authenticator by also checking a small window of
//! adjacent steps.

use crate::{hotp, OtpError, Result};

/// Number of `step_seconds`-long time steps elapsed at `unix_seconds`.
pub fn counter_for(unix_seconds: u64, step_seconds: u32) -> Result<u64> {
    if step_seconds == 0 {
        return Err(OtpError::ZeroTimeStep);
    }
    Ok(unix_seconds / u64::from(step_seconds))
}

/// Computes the TOTP value for the time step containing `unix_seconds`.
pub fn generate(secret: &[u8], unix_seconds: u64, step_seconds: u32, digits: u32) -> Result<String> {
    hotp::generate(secret, counter_for(unix_seconds, step_seconds)?, digits)
}

/// Checks `candidate` against the time step containing `unix_seconds`
/// and the `window` steps on either side of it.
///
/// Each comparison is constant-time over the code bytes, so a partial
/// match costs the same as a complete mismatch. Returns `false` when
/// the whole window is exhausted without a match.
pub fn validate(
    secret: &[u8],
    candidate: &str,
    unix_seconds: u64,
    step_seconds: u32,
    digits: u32,
    window: u32,
) -> Result<bool> {
    let counter = counter_for(unix_seconds, step_seconds)?;
    for d in -i64::from(window)..=i64::from(window) {
        // near the epoch the window may reach below counter 0; skip
        // those offsets rather than wrapping around
        let Some(c) = counter.checked_add_signed(d) else {
            continue;
        };
        let code = hotp::generate(secret, c, digits)?;
        if constant_time_eq(code.as_bytes(), candidate.as_bytes()) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Constant-time byte comparison for OTP codes.
///
/// The early return on length mismatch leaks only the expected digit
/// count, which is public; the accumulated XOR protects the code value
/// itself from short-circuit timing.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
