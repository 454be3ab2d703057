use crate::{
    error::config::ConfigError,
    model::{secret::Secret, user::Role, user::StaticUser},
};

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Static credential roster, parsed from `KONTOWART_USERS`.
    pub users: Vec<StaticUser>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require_env("DATABASE_URL")?;
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let users = parse_users(&require_env("KONTOWART_USERS")?)?;

        Ok(Self {
            database_url,
            bind_address,
            users,
        })
    }

    /// Looks up a roster user by exact username.
    pub fn find_user(&self, username: &str) -> Option<&StaticUser> {
        self.users.iter().find(|user| user.username == username)
    }
}

fn require_env(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

/// Parses the user roster from its environment format:
/// comma-separated `username:password:role` triples, role `admin` or `friend`.
fn parse_users(raw: &str) -> Result<Vec<StaticUser>, ConfigError> {
    let mut users = Vec::new();

    for item in raw.split(',').filter(|item| !item.trim().is_empty()) {
        let mut parts = item.trim().splitn(3, ':');

        let (username, password, role) = match (parts.next(), parts.next(), parts.next()) {
            (Some(username), Some(password), Some(role))
                if !username.is_empty() && !password.is_empty() =>
            {
                (username, password, role)
            }
            _ => {
                return Err(ConfigError::InvalidEnvValue {
                    var: "KONTOWART_USERS".to_string(),
                    reason: format!("expected username:password:role, got {:?}", item),
                })
            }
        };

        let role = match role {
            "admin" => Role::Admin,
            "friend" => Role::Friend,
            other => {
                return Err(ConfigError::InvalidEnvValue {
                    var: "KONTOWART_USERS".to_string(),
                    reason: format!("unknown role {:?}", other),
                })
            }
        };

        users.push(StaticUser {
            username: username.to_string(),
            password: Secret::new(password),
            role,
        });
    }

    if users.is_empty() {
        return Err(ConfigError::InvalidEnvValue {
            var: "KONTOWART_USERS".to_string(),
            reason: "at least one user is required".to_string(),
        });
    }

    Ok(users)
}
