use std::sync::Arc;

use chrono::Utc;

use crate::identity::errors::RegistryError;
use crate::identity::models::Identifier;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::ports::CredentialStore;

/// Enforces identifier uniqueness and creates or retrieves identity records.
pub struct IdentityRegistry<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> IdentityRegistry<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Advisory existence check.
    ///
    /// A `false` here does not guarantee that a following `create` succeeds.
    pub async fn is_identifier_taken(&self, identifier: &Identifier) -> Result<bool, RegistryError> {
        Ok(self.store.get(identifier).await?.is_some())
    }

    /// Persist a new identity with one write.
    ///
    /// # Errors
    /// * `AlreadyExists` - The store rejected the identifier as a duplicate
    /// * `Store` - Any other store failure
    pub async fn create(
        &self,
        identifier: Identifier,
        secret_hash: String,
    ) -> Result<Identity, RegistryError> {
        let identity = Identity {
            id: IdentityId::new(),
            identifier,
            secret_hash,
            created_at: Utc::now(),
        };

        Ok(self.store.insert_unique(identity).await?)
    }

    /// # Errors
    /// * `NotFound` - No identity with this identifier
    /// * `Store` - Store failure
    pub async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Identity, RegistryError> {
        self.store
            .get(identifier)
            .await?
            .ok_or_else(|| RegistryError::NotFound(identifier.to_string()))
    }
}
