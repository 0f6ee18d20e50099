//! User Entity

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A registered account
///
/// `password_hash` is a blake3 hex digest, never the plaintext password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub email: String,
    pub password_hash: String,
    pub created_at: Option<i64>,
}

impl User {
    pub fn new(id: u32, email: String, password_hash: String) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at: None,
        }
    }
}

impl Entity for User {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
