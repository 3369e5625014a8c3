//! # Tokengate Core
//!
//! Token lifecycle domain for the Tokengate backend: credential codec,
//! refresh-token store interface, and the token service that issues,
//! verifies, and rotates access/refresh credential pairs.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
