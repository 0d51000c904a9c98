//! Secret handling for credentials read from configuration
//!
//! The Data API key is wrapped in [`secrecy::Secret`] so it is zeroized on
//! drop, redacted in `Debug` output, and only readable through
//! `expose_secret()`.
//!
//! ```rust
//! use harvest::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("api-key".to_string());
//! assert_eq!(key.expose_secret().as_str(), "api-key");
//! assert!(!format!("{key:?}").contains("api-key"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String payload that can live inside a [`Secret`]
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    /// True when the secret holds an empty string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the secret as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        SecretValue(value)
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

/// Secret string as stored in configuration structs
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string into a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
