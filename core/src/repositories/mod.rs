//! Repository interfaces for persisted state owned by the token core.

pub mod token;

pub use token::{MockTokenStore, ReplaceOutcome, TokenStore};
