//! In-process credential store for development and tests.
//!
//! Records are lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::identity::models::Identifier;
use crate::domain::identity::models::Identity;
use crate::domain::identity::ports::CredentialStore;
use crate::identity::errors::StoreError;

/// Credential store backed by a map keyed on the exact identifier.
///
/// The existence check and the insert happen under one write lock, which
/// plays the role of a database UNIQUE constraint.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    identities: RwLock<HashMap<Identifier, Identity>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.identities.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, identifier: &Identifier) -> Result<Option<Identity>, StoreError> {
        Ok(self.identities.read().await.get(identifier).cloned())
    }

    async fn insert_unique(&self, identity: Identity) -> Result<Identity, StoreError> {
        let mut identities = self.identities.write().await;

        if identities.contains_key(&identity.identifier) {
            return Err(StoreError::Conflict(identity.identifier.to_string()));
        }

        identities.insert(identity.identifier.clone(), identity.clone());
        Ok(identity)
    }
}
