//! Per-instance algorithm parameters.

use crate::{hotp, OtpError, Result};

/// Minimum secret length in bytes (80 bits, RFC 4226 §4 R6).
pub(crate) const MIN_SECRET_LENGTH: usize = 10;

/// Parameters shared by enrollment and validation.
///
/// Carried explicitly per [`Enroller`](crate::Enroller) /
/// [`Validator`](crate::Validator) instance rather than process-wide,
/// so tenants with different digit counts or step lengths can coexist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpConfig {
    /// Number of digits in a code (6 to 8, default 6).
    pub digits: u32,
    /// Time-step length in seconds (default 30).
    pub step_seconds: u32,
    /// Steps accepted on either side of the current one (default 1).
    pub window: u32,
    /// Secret length in bytes drawn at enrollment (default 10).
    pub secret_length: usize,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            digits: 6,
            step_seconds: 30,
            window: 1,
            secret_length: MIN_SECRET_LENGTH,
        }
    }
}

impl OtpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    pub fn step_seconds(mut self, step_seconds: u32) -> Self {
        self.step_seconds = step_seconds;
        self
    }

    pub fn window(mut self, window: u32) -> Self {
        self.window = window;
        self
    }

    pub fn secret_length(mut self, secret_length: usize) -> Self {
        self.secret_length = secret_length;
        self
    }

    /// Checks every parameter against its invariant.
    pub fn validate(&self) -> Result<()> {
        if !(hotp::MIN_DIGITS..=hotp::MAX_DIGITS).contains(&self.digits) {
            return Err(OtpError::DigitsOutOfRange(self.digits));
        }
        if self.step_seconds == 0 {
            return Err(OtpError::ZeroTimeStep);
        }
        if self.secret_length < MIN_SECRET_LENGTH {
            return Err(OtpError::SecretTooShort {
                requested: self.secret_length,
                min: MIN_SECRET_LENGTH,
            });
        }
        Ok(())
    }
}
