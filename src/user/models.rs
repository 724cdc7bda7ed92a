//! User account models. Users exist only for authentication and
//! authorization; they are not a managed resource of the public API.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            _ => anyhow::bail!("Unknown role {}", s),
        }
    }
}

/// Public view of a user, safe to return in responses.
#[derive(Clone, Debug, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

/// Full account row including the password hash. Never serialized.
#[derive(Clone, Debug)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

impl UserAccount {
    pub fn public(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}
