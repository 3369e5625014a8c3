//! Token service module for the credential lifecycle
//!
//! This module handles all token-related operations including:
//! - Signed credential encoding and verification (codec)
//! - Access/refresh pair issuance
//! - Refresh credential rotation with reuse detection
//! - Session revocation

mod codec;
mod config;
mod service;


pub use codec::CredentialCodec;
pub use config::TokenServiceConfig;
pub use service::{hash_token, TokenService};
