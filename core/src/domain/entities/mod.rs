//! Domain entities for identity claims and credentials.

pub mod identity;
pub mod token;

// Re-export commonly used types
pub use identity::{Identity, Role};
pub use token::{
    Claims, RefreshRecord, TokenKind, TokenPair,
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_HOURS,
    JWT_AUDIENCE, JWT_ISSUER,
};
