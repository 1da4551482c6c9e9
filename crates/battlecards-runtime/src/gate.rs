//! Password check guarding edit mode.

use crate::{EditConfig, Error, Result};
use sha2::{Digest, Sha256};

pub const DEFAULT_PASSWORD: &str = "sales123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Entered,
    Rejected,
}

#[derive(Clone, PartialEq, Eq)]
enum Secret {
    Plain(String),
    Sha256([u8; 32]),
}

/// Compares entered passwords against the configured secret.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordGate {
    secret: Secret,
}

impl std::fmt::Debug for PasswordGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.secret {
            Secret::Plain(_) => "plain",
            Secret::Sha256(_) => "sha256",
        };
        f.debug_struct("PasswordGate").field("secret", &kind).finish()
    }
}

impl Default for PasswordGate {
    fn default() -> Self {
        Self::plain(DEFAULT_PASSWORD)
    }
}

impl PasswordGate {
    pub fn plain(password: impl Into<String>) -> Self {
        Self {
            secret: Secret::Plain(password.into()),
        }
    }

    /// Gate on a hex-encoded SHA-256 digest.
    pub fn sha256_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        if hex.len() != 64 || !hex.is_ascii() {
            return Err(Error::Config(
                "edit.password_sha256 must be 64 hex characters".to_string(),
            ));
        }
        let mut digest = [0u8; 32];
        for (i, byte) in digest.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| {
                Error::Config("edit.password_sha256 is not valid hex".to_string())
            })?;
        }
        Ok(Self {
            secret: Secret::Sha256(digest),
        })
    }

    pub fn from_config(edit: &EditConfig) -> Result<Self> {
        match (&edit.password_sha256, &edit.password) {
            (Some(hex), _) => Self::sha256_hex(hex),
            (None, Some(password)) => Ok(Self::plain(password.clone())),
            (None, None) => Ok(Self::default()),
        }
    }

    pub fn check(&self, input: &str) -> bool {
        match &self.secret {
            Secret::Plain(password) => input == password,
            Secret::Sha256(expected) => Sha256::digest(input.as_bytes()).as_slice() == expected,
        }
    }
}
