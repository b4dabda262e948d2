use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use tokio::task;

use crate::identity::errors::AuthError;
use crate::identity::errors::RegistryError;
use crate::identity::models::AuthenticatedIdentity;
use crate::identity::models::CredentialPolicy;
use crate::identity::models::Identifier;
use crate::identity::models::IdentityId;
use crate::identity::models::RegisteredIdentity;
use crate::identity::models::Secret;
use crate::identity::models::SessionToken;
use crate::identity::ports::AuthServicePort;
use crate::identity::ports::CredentialStore;
use crate::identity::registry::IdentityRegistry;

/// Domain service composing registry, hasher and token handling into the
/// register, login and authorize flows.
///
/// Owns the mapping from internal failures to the public [`AuthError`] kinds.
pub struct AuthService<S>
where
    S: CredentialStore,
{
    registry: IdentityRegistry<S>,
    authenticator: Arc<Authenticator>,
    policy: CredentialPolicy,
}

impl<S> AuthService<S>
where
    S: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Hasher and token handling built from the signing key
    /// * `policy` - Registration password policy
    pub fn new(store: Arc<S>, authenticator: Arc<Authenticator>, policy: CredentialPolicy) -> Self {
        Self {
            registry: IdentityRegistry::new(store),
            authenticator,
            policy,
        }
    }

    /// Spend one decoy verification, then fail the login like a wrong password.
    async fn reject_unknown(&self, identifier: &str, secret: &str) -> AuthError {
        let authenticator = Arc::clone(&self.authenticator);
        let secret = secret.to_string();

        match task::spawn_blocking(move || authenticator.reject_unknown(&secret)).await {
            Ok(_) => login_failed(identifier),
            Err(e) => AuthError::internal("Decoy verification task failed", e),
        }
    }
}

// Unknown identifier and wrong password must leave the same trace.
fn login_failed(identifier: &str) -> AuthError {
    tracing::warn!(identifier = %identifier, "Login failed");
    AuthError::InvalidCredentials
}

fn token_rejected() -> AuthError {
    tracing::debug!("Token rejected");
    AuthError::InvalidCredential
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: CredentialStore,
{
    async fn register(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<RegisteredIdentity, AuthError> {
        let identifier = Identifier::new(identifier)?;
        let secret = Secret::new(secret, &self.policy)?;

        let taken = self
            .registry
            .is_identifier_taken(&identifier)
            .await
            .map_err(|e| AuthError::internal("Identity lookup failed during registration", e))?;
        if taken {
            tracing::warn!(identifier = %identifier, "Registration rejected: identifier taken");
            return Err(AuthError::DuplicateIdentity);
        }

        let authenticator = Arc::clone(&self.authenticator);
        let plaintext = secret.expose().to_string();
        let secret_hash = task::spawn_blocking(move || authenticator.hash_password(&plaintext))
            .await
            .map_err(|e| AuthError::internal("Password hashing task failed", e))?
            .map_err(|e| AuthError::internal("Password hashing failed", e))?;

        // The store's uniqueness constraint has the final word; the check
        // above can be overtaken by a concurrent registration.
        match self.registry.create(identifier, secret_hash).await {
            Ok(identity) => {
                tracing::info!(
                    identity_id = %identity.id,
                    identifier = %identity.identifier,
                    "Identity registered"
                );
                Ok(identity.into())
            }
            Err(RegistryError::AlreadyExists(identifier)) => {
                tracing::warn!(
                    identifier = %identifier,
                    "Registration rejected: identifier stored concurrently"
                );
                Err(AuthError::DuplicateIdentity)
            }
            Err(e) => Err(AuthError::internal("Identity creation failed", e)),
        }
    }

    async fn login(&self, identifier: &str, secret: &str) -> Result<SessionToken, AuthError> {
        // A malformed identifier cannot belong to anyone.
        let Ok(parsed) = Identifier::new(identifier) else {
            return Err(self.reject_unknown(identifier, secret).await);
        };

        let identity = match self.registry.find_by_identifier(&parsed).await {
            Ok(identity) => identity,
            Err(RegistryError::NotFound(_)) => {
                return Err(self.reject_unknown(identifier, secret).await)
            }
            Err(e) => return Err(AuthError::internal("Identity lookup failed during login", e)),
        };

        let authenticator = Arc::clone(&self.authenticator);
        let secret = secret.to_string();
        let stored_hash = identity.secret_hash.clone();
        let subject = identity.id;
        let claimed = identity.identifier.to_string();
        let result = task::spawn_blocking(move || {
            authenticator.authenticate(&secret, &stored_hash, subject, &claimed)
        })
        .await
        .map_err(|e| AuthError::internal("Credential verification task failed", e))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => login_failed(identifier),
            other => AuthError::internal("Credential verification failed", other),
        })?;

        let expires_at = result
            .claims
            .expires_at()
            .ok_or_else(|| AuthError::internal("Token expiry out of range", result.claims.exp))?;

        tracing::info!(identity_id = %identity.id, "Session token issued");

        Ok(SessionToken {
            access_token: result.access_token,
            expires_at,
        })
    }

    fn authorize(&self, token: Option<&str>) -> Result<AuthenticatedIdentity, AuthError> {
        let token = match token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::MissingCredential),
        };

        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|_| token_rejected())?;

        let subject = IdentityId::from_string(&claims.sub).map_err(|_| token_rejected())?;

        match (claims.issued_at(), claims.expires_at()) {
            (Some(issued_at), Some(expires_at)) => Ok(AuthenticatedIdentity {
                subject,
                identifier: claims.identifier,
                issued_at,
                expires_at,
            }),
            _ => Err(token_rejected()),
        }
    }
}
