//! User domain model

use serde::{Deserialize, Serialize};

/// A signed-in user, derived entirely from a valid session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub token: String,
}

impl User {
    pub fn new(id: u64, username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            token: token.into(),
        }
    }
}
