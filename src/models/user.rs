use serde::{Deserialize, Serialize};

use crate::constants::{ERR_PASSWORD_TOO_SHORT, ERR_USERNAME_REQUIRED, MIN_PASSWORD_LENGTH};

/// User row from the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Peppered password hash, never sent back to clients
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Username/password pair posted to register and login
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Validate credentials submitted for registration
    pub fn validate_for_registration(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err(ERR_USERNAME_REQUIRED);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ERR_PASSWORD_TOO_SHORT);
        }
        Ok(())
    }
}
