//! # Tokengate Infrastructure
//!
//! Concrete persistence for the token core: a MySQL implementation of
//! the `TokenStore` trait using SQLx, including the atomic
//! replace-or-reject primitive rotation depends on.

pub mod database;

pub use database::MySqlTokenStore;
