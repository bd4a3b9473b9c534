//! Namespaced resource identifiers (`namespace:path`)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::MarkerError;

/// Namespace used when an identifier is written without one
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A registry identifier such as `minecraft:player`
///
/// Both parts are reference counted so identifiers (and the marker kinds
/// carrying them) are cheap to clone across threads.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    namespace: Arc<str>,
    path: Arc<str>,
}

impl Identifier {
    /// Build an identifier from its two parts, validating both
    pub fn new(namespace: &str, path: &str) -> Result<Self, MarkerError> {
        if namespace.is_empty() || !namespace.chars().all(is_namespace_char) {
            return Err(MarkerError::InvalidIdentifier(format!("{namespace}:{path}")));
        }
        if path.is_empty() || !path.chars().all(is_path_char) {
            return Err(MarkerError::InvalidIdentifier(format!("{namespace}:{path}")));
        }
        Ok(Self {
            namespace: namespace.into(),
            path: path.into(),
        })
    }

    /// Identifier in the default namespace
    pub fn vanilla(path: &str) -> Result<Self, MarkerError> {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    /// Built-in vanilla identifier; the path must already be valid
    pub(crate) fn builtin(path: &'static str) -> Self {
        debug_assert!(path.chars().all(is_path_char));
        Self {
            namespace: DEFAULT_NAMESPACE.into(),
            path: path.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl FromStr for Identifier {
    type Err = MarkerError;

    /// Parse `namespace:path`, or a bare `path` in the default namespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::vanilla(s),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({self})")
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
