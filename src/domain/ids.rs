//! Domain identifier types with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Document-store collection name
///
/// Follows the MongoDB naming rules: non-empty, no `$`, no NUL character,
/// and not inside the reserved `system.` namespace.
///
/// # Examples
///
/// ```
/// use harvest::domain::ids::CollectionName;
/// use std::str::FromStr;
///
/// let name = CollectionName::from_str("reviews").unwrap();
/// assert_eq!(name.as_str(), "reviews");
/// assert!(CollectionName::from_str("system.users").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// Creates a new CollectionName, validating it
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Collection name cannot be empty".to_string());
        }
        if name.contains('$') {
            return Err(format!("Collection name '{name}' cannot contain '$'"));
        }
        if name.contains('\0') {
            return Err("Collection name cannot contain a NUL character".to_string());
        }
        if name.starts_with("system.") {
            return Err(format!(
                "Collection name '{name}' is in the reserved 'system.' namespace"
            ));
        }
        Ok(Self(name))
    }

    /// Returns the collection name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CollectionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CollectionName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CollectionName> for String {
    fn from(name: CollectionName) -> Self {
        name.0
    }
}

/// Identifier of a single ingestion run, attached to every log event of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a fresh random run id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
