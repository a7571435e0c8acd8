//! Credential handling with secure memory.
//!
//! Wraps provider API keys in `secrecy` so they never leak through `Debug`,
//! `Display`, or log output.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// An API key or other credential that must not appear in logs.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret for use in an outbound request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_redact() {
        let key = SecretString::new("tvly-abc123");
        assert_eq!(format!("{key:?}"), "[REDACTED]");
        assert_eq!(key.to_string(), "[REDACTED]");
    }

    #[test]
    fn expose_returns_the_value() {
        let key = SecretString::new("tvly-abc123");
        assert_eq!(key.expose(), "tvly-abc123");
    }
}
