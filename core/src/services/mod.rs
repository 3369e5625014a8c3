//! Business services orchestrating the domain layer.

pub mod token;

pub use token::{hash_token, CredentialCodec, TokenService, TokenServiceConfig};
