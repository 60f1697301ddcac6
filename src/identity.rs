//! Identity

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, opaque identifier for an authenticated user.
///
/// The identity provider hands this out at sign-in; the engine treats
/// it purely as a persistence key and never inspects its contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Wraps an identity string from the identity provider.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    /// The identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId(id)
    }
}
