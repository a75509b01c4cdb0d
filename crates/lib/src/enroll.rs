//! Enrollment: secret generation and provisioning material.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::{base32, OtpConfig, OtpError, Result};

/// Raw HMAC key material shared with the user's authenticator app.
///
/// Deliberately opaque: `Debug` never reveals the bytes, and there is
/// no `Display`. Render it with [`Secret::to_base32`] or
/// [`Secret::manual_entry_code`] when it must be shown to the user.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Wraps key material retrieved from the caller's storage layer.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(OtpError::EmptySecret);
        }
        Ok(Self(bytes))
    }

    /// Reconstructs a secret from its base32 rendering, as stored or as
    /// re-entered by hand (lowercase, spacing, and padding tolerated).
    pub fn from_base32(text: &str) -> Result<Self> {
        Self::from_bytes(base32::decode(text)?)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The canonical unpadded-uppercase base32 rendering. Idempotent:
    /// the same secret always yields the same text.
    pub fn to_base32(&self) -> String {
        base32::encode(&self.0)
    }

    /// Base32 grouped into 4-character blocks for manual entry.
    ///
    /// Stripping the whitespace gives back [`Secret::to_base32`], so the
    /// grouped form feeds straight into [`Secret::from_base32`].
    pub fn manual_entry_code(&self) -> String {
        let encoded = self.to_base32();
        let mut out = String::with_capacity(encoded.len() + encoded.len() / 4);
        for (i, c) in encoded.chars().enumerate() {
            if i > 0 && i % 4 == 0 {
                out.push(' ');
            }
            out.push(c);
        }
        out
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret").finish_non_exhaustive()
    }
}

/// Everything an authenticator app needs to configure a new TOTP entry.
///
/// Immutable once built; the algorithm is fixed to SHA1 for
/// compatibility with common authenticator apps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvisioningMaterial {
    issuer: String,
    account: String,
    encoded_secret: String,
    digits: u32,
    step_seconds: u32,
}

impl ProvisioningMaterial {
    /// The `otpauth://` URI a scannable-code renderer turns into an
    /// image. `secret` is kept first in the query string for
    /// compatibility with common scanners.
    pub fn uri(&self) -> String {
        let issuer = urlencoding::encode(&self.issuer);
        format!(
            "otpauth://totp/{issuer}:{account}?secret={secret}&issuer={issuer}&algorithm=SHA1&digits={digits}&period={period}",
            account = urlencoding::encode(&self.account),
            secret = self.encoded_secret,
            digits = self.digits,
            period = self.step_seconds,
        )
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn encoded_secret(&self) -> &str {
        &self.encoded_secret
    }
}

/// Enrolls accounts into TOTP two-factor authentication for one issuer.
#[derive(Clone, Debug)]
pub struct Enroller {
    config: OtpConfig,
    issuer: String,
}

/// A freshly generated secret with its provisioning material. The
/// caller persists the secret and displays the material; nothing is
/// stored here.
#[derive(Debug)]
pub struct Enrollment {
    pub secret: Secret,
    pub material: ProvisioningMaterial,
}

impl Enroller {
    pub fn new(config: OtpConfig, issuer: impl Into<String>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            issuer: issuer.into(),
        })
    }

    /// Generates a fresh secret and bundles it with the provisioning
    /// material for `account`.
    pub fn enroll(&self, account: &str) -> Result<Enrollment> {
        let secret = self.generate_secret()?;
        let material = self.provisioning_material(account, &secret);
        Ok(Enrollment { secret, material })
    }

    /// Draws `secret_length` bytes from the OS secure random source.
    ///
    /// A failed read aborts enrollment; no weaker fallback source is
    /// ever consulted.
    pub fn generate_secret(&self) -> Result<Secret> {
        let mut bytes = vec![0u8; self.config.secret_length];
        OsRng.try_fill_bytes(&mut bytes)?;
        tracing::debug!(issuer = %self.issuer, bytes = bytes.len(), "generated totp secret");
        Secret::from_bytes(bytes)
    }

    /// Builds the provisioning material for an existing secret.
    pub fn provisioning_material(&self, account: &str, secret: &Secret) -> ProvisioningMaterial {
        ProvisioningMaterial {
            issuer: self.issuer.clone(),
            account: account.to_string(),
            encoded_secret: secret.to_base32(),
            digits: self.config.digits,
            step_seconds: self.config.step_seconds,
        }
    }
}
