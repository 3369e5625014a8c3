//! Identity claims carried by every issued credential.

use serde::{Deserialize, Serialize};

/// Role assigned to an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// The authoritative identity payload embedded in both credential kinds.
///
/// Supplied externally at login and immutable once a credential is minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric user identifier
    pub user_id: i64,

    /// User role
    pub role: Role,

    /// Whether the user's account is verified
    pub is_verified: bool,
}

impl Identity {
    pub fn new(user_id: i64, role: Role, is_verified: bool) -> Self {
        Self {
            user_id,
            role,
            is_verified,
        }
    }
}
