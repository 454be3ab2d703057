use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored credential value.
///
/// The application displays credentials back to their owner, so the value
/// round-trips through serialization as-is. The type exists to keep every
/// plaintext touchpoint in one place: `Debug` output is masked, and a future
/// hardening pass (hashing, masking on display) only has to change this type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the plaintext value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(****)")
    }
}
