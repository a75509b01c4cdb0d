//! Two-factor authentication engine built on HOTP (RFC 4226) and
//! TOTP (RFC 6238).
//!
//! The crate covers the full lifecycle of a TOTP second factor:
//!
//! - [`Enroller`] draws a fresh random [`Secret`] and produces the
//!   [`ProvisioningMaterial`] an authenticator app needs (manual-entry
//!   code and `otpauth://` URI).
//! - [`Validator`] checks a user-supplied code against a stored secret,
//!   tolerating clock drift via a window of adjacent time steps.
//!
//! Storage and delivery of the secret are the caller's concern; every
//! operation here is synchronous, stateless, and safe to call from
//! multiple threads.

pub mod base32;
mod config;
mod enroll;
pub mod hotp;
pub mod totp;
mod validate;

pub use config::OtpConfig;
pub use enroll::{Enroller, Enrollment, ProvisioningMaterial, Secret};
pub use validate::{Validation, Validator};

use hmac::digest::InvalidLength;

#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    /// The stored or re-entered secret is not valid base32 text.
    #[error("invalid base32 secret")]
    MalformedSecret(#[from] data_encoding::DecodeError),
    /// The candidate code is not exactly `expected` decimal digits.
    #[error("code must be exactly {expected} decimal digits")]
    MalformedCode { expected: u32 },
    #[error("secret must not be empty")]
    EmptySecret,
    /// Requested secret length is below the RFC 4226 recommended minimum.
    #[error("secret length must be at least {min} bytes, requested {requested}")]
    SecretTooShort { requested: usize, min: usize },
    #[error("digits must be between 6 and 8, got {0}")]
    DigitsOutOfRange(u32),
    #[error("time step must be positive")]
    ZeroTimeStep,
    #[error("error when computing HMAC")]
    HmacError(#[from] InvalidLength),
    /// The OS secure random source could not be read. Fatal to
    /// enrollment; no weakened secret is ever produced.
    #[error("secure random source unavailable")]
    RandomSourceUnavailable(#[from] rand::Error),
}

pub type Result<T> = std::result::Result<T, OtpError>;
