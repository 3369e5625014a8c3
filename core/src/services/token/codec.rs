//! Credential codec: encodes and decodes signed, expiring claims.
//!
//! Pure functions over a signing key; no I/O and no store access.
//! Validity of anything this codec verifies is fully determined by
//! signature and embedded expiry.

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{Claims, TokenKind, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::TokenError;

/// Codec for signed, expiring credentials (HS256)
pub struct CredentialCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl CredentialCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Expiry must be exact: the refresh gate relies on access-token
        // expiry to trigger rotation.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issues a signed credential of the given kind embedding the
    /// identity with `exp = now + ttl`. Returns the opaque string
    /// together with the claims that were minted into it.
    pub fn issue(
        &self,
        identity: &Identity,
        ttl: Duration,
        kind: TokenKind,
    ) -> Result<(String, Claims), TokenError> {
        let claims = Claims::with_ttl(identity, ttl, kind);
        let credential = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)?;
        Ok((credential, claims))
    }

    /// Verifies a credential's signature, structure, kind, and expiry.
    ///
    /// No side effects. Fails with [`TokenError::Expired`] past the
    /// embedded expiry and [`TokenError::Malformed`] for anything the
    /// signature or structure check rejects. A credential minted as the
    /// other kind is malformed here: both kinds share the signing key,
    /// so the embedded kind is the only thing stopping a long-lived
    /// refresh credential from doubling as an access credential.
    pub fn verify(&self, credential: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(credential, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if token_data.claims.kind != expected {
            return Err(TokenError::Malformed);
        }

        Ok(token_data.claims)
    }
}
