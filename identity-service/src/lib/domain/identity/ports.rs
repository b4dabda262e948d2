use async_trait::async_trait;

use crate::identity::errors::AuthError;
use crate::identity::errors::StoreError;
use crate::identity::models::AuthenticatedIdentity;
use crate::identity::models::Identifier;
use crate::identity::models::Identity;
use crate::identity::models::RegisteredIdentity;
use crate::identity::models::SessionToken;

/// Port for authentication operations exposed to the request layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `identifier` - Raw login handle
    /// * `secret` - Raw plaintext password
    ///
    /// # Returns
    /// Created identity, without its secret hash
    ///
    /// # Errors
    /// * `Validation` - Identifier or password rejected by policy
    /// * `DuplicateIdentity` - Identifier is already registered
    /// * `InternalFault` - Store or hashing failure
    async fn register(&self, identifier: &str, secret: &str)
        -> Result<RegisteredIdentity, AuthError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password (indistinguishable)
    /// * `InternalFault` - Store, hashing, or signing failure
    async fn login(&self, identifier: &str, secret: &str) -> Result<SessionToken, AuthError>;

    /// Verify a bearer token and recover its identity claims.
    ///
    /// Touches no store.
    ///
    /// # Arguments
    /// * `token` - Bearer token, `None` if the request carried none
    ///
    /// # Errors
    /// * `MissingCredential` - No token supplied
    /// * `InvalidCredential` - Token is malformed, altered, or expired (indistinguishable)
    fn authorize(&self, token: Option<&str>) -> Result<AuthenticatedIdentity, AuthError>;
}

/// Narrow persistence interface for identity records.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve the record stored under exactly this identifier.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be reached
    /// * `Corrupt` - Stored row could not be read back
    async fn get(&self, identifier: &Identifier) -> Result<Option<Identity>, StoreError>;

    /// Insert a record, enforcing identifier uniqueness atomically.
    ///
    /// # Returns
    /// The stored identity
    ///
    /// # Errors
    /// * `Conflict` - A record with this identifier already exists
    /// * `Unavailable` - Store could not be reached
    async fn insert_unique(&self, identity: Identity) -> Result<Identity, StoreError>;
}
