use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::SessionClaims;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::session::TokenIssuer;
use crate::session::TokenVerifier;

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-identifiers";

/// Authentication coordinator combining password verification and token handling.
///
/// Built once at startup from the signing secret and the session TTL, then
/// shared read-only between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    decoy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
    /// Claims encoded in `access_token`
    pub claims: SessionClaims,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of every issued token
    ///
    /// # Errors
    /// * `PasswordError` - The decoy hash used by [`Self::reject_unknown`]
    ///   could not be computed
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new();
        let decoy_hash = password_hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            issuer: TokenIssuer::new(jwt_secret, token_ttl),
            verifier: TokenVerifier::new(jwt_secret),
            decoy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity id to place in `sub`
    /// * `identifier` - Login handle to place in the claims
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
        identifier: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let issued = self.issuer.issue(subject, identifier)?;

        Ok(AuthenticationResult {
            access_token: issued.access_token,
            claims: issued.claims,
        })
    }

    /// Burn one password verification against a decoy hash.
    ///
    /// Used when the identity does not exist so that path costs as much as
    /// a wrong password. Always ends in `InvalidCredentials`.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, &self.decoy_hash);
        AuthenticationError::InvalidCredentials
    }

    /// Validate a session token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is expired, altered, or malformed
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.verifier.verify(token)
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }
}
