//! Code validation against the wall clock.

use unix_time::Instant;

use crate::{totp, OtpConfig, OtpError, Result, Secret};

/// Outcome of checking a well-formed code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    Accepted,
    Rejected,
}

/// Validates user-entered codes against stored secrets.
///
/// Reads UTC wall-clock time, not a monotonic clock: server and
/// authenticator app must agree on absolute time.
pub struct Validator {
    config: OtpConfig,
    now: Box<dyn Fn() -> Instant + Send + Sync>,
}

impl Validator {
    pub fn new(config: OtpConfig) -> Result<Self> {
        Self::new_with_now(config, Box::new(Instant::now))
    }

    /// Get a validator with a custom function to provide the "now"
    /// value.
    ///
    /// See [`Self::new`].
    pub fn new_with_now(
        config: OtpConfig,
        now: Box<dyn Fn() -> Instant + Send + Sync>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, now })
    }

    /// Checks a user-entered code against `secret` at the current time.
    ///
    /// Leading and trailing whitespace is trimmed first. Input that is
    /// not exactly `digits` ASCII decimal characters is a
    /// [`OtpError::MalformedCode`] error; a well-formed code that
    /// matches no step in the window is an ordinary
    /// [`Validation::Rejected`], never an error.
    pub fn check_code(&self, secret: &Secret, user_input: &str) -> Result<Validation> {
        let candidate = user_input.trim();
        if candidate.len() != self.config.digits as usize
            || !candidate.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(OtpError::MalformedCode {
                expected: self.config.digits,
            });
        }

        let elapsed = (self.now)() - Instant::at(0, 0);
        let matched = totp::validate(
            secret.as_bytes(),
            candidate,
            elapsed.as_secs(),
            self.config.step_seconds,
            self.config.digits,
            self.config.window,
        )?;

        if matched {
            Ok(Validation::Accepted)
        } else {
            tracing::debug!("totp code rejected");
            Ok(Validation::Rejected)
        }
    }
}
