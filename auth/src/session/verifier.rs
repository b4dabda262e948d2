use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;

/// Validates session tokens and recovers their claims.
///
/// Pure check: no I/O and no state beyond the key.
pub struct TokenVerifier {
    handler: JwtHandler,
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            handler: JwtHandler::new(secret),
        }
    }

    /// Verify signature, shape and expiry of `token`.
    ///
    /// The returned error keeps the precise cause for server-side logging;
    /// callers exposing the result externally should collapse it.
    ///
    /// # Errors
    /// * `TokenExpired` - Token reached its expiry
    /// * `InvalidSignature` - Token was not signed with this key or was altered
    /// * `MissingClaim` / `DecodingFailed` - Token is malformed
    pub fn verify(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let claims: SessionClaims = self.handler.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
