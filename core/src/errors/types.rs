//! Error type definitions for credential verification and rotation.
//!
//! Authentication failures are terminal for the current request and are
//! surfaced as 401 by the presentation layer; none are retried internally.
//! No credential material appears in any message.

use thiserror::Error;

/// Codec-level errors for signed, expiring credentials
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Credential expired")]
    Expired,

    #[error("Malformed credential")]
    Malformed,

    #[error("Credential generation failed")]
    GenerationFailed,
}

/// Authentication failures surfaced by the gates
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Access token missing")]
    MissingAccess,

    #[error("Refresh token missing")]
    MissingRefresh,

    #[error("Access token expired")]
    ExpiredAccess,

    #[error("Malformed access token")]
    MalformedAccess,

    /// Refresh credential is expired or fails signature/structure checks
    #[error("Invalid refresh token")]
    InvalidRefresh,

    /// Well-formed refresh credential with no matching store record:
    /// prior consumption or revocation. A security signal, not a
    /// routine expiry.
    #[error("Refresh token reused or revoked")]
    RefreshReuseOrRevoked,
}
