use serde::{Deserialize, Serialize};

use crate::model::secret::Secret;

/// Role assigned to a named user in the static roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Friend,
}

/// The authenticated user performing an operation.
#[derive(Clone, Debug)]
pub struct Actor {
    pub username: String,
    pub role: Role,
}

impl Actor {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A user in the static credential roster loaded from configuration.
///
/// This is a fixed lookup table, not an account system: users are named in the
/// environment and verified by direct comparison.
#[derive(Clone, Debug)]
pub struct StaticUser {
    pub username: String,
    pub password: Secret,
    pub role: Role,
}

impl StaticUser {
    pub fn to_actor(&self) -> Actor {
        Actor::new(self.username.clone(), self.role)
    }
}
