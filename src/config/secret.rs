//! Secure credential handling using the secrecy crate
//!
//! The CDP user key and secret and the SMTP password are held as
//! `Secret<SecretValue>`: memory is zeroed on drop, `Debug` is redacted and
//! the value is only reachable through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use cdp_report::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let password = secret_string("my-password".to_string());
//! assert_eq!(password.expose_secret().as_ref(), "my-password");
//! assert!(!format!("{password:?}").contains("my-password"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Default, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// An empty secret, the value a credential takes when nothing configures it
#[inline]
pub fn empty_secret() -> SecretString {
    secret_string(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("test-password".to_string());
        assert_eq!(secret.expose_secret(), "test-password");
    }

    #[test]
    fn test_empty_secret() {
        assert!(empty_secret().expose_secret().is_empty());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Credentials {
            secret: SecretString,
        }

        let parsed: Credentials = toml::from_str(r#"secret = "s3cr3t""#).unwrap();
        assert_eq!(parsed.secret.expose_secret(), "s3cr3t");
    }
}
