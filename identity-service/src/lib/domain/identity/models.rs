use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::identity::errors::IdentifierError;
use crate::identity::errors::IdentityIdError;
use crate::identity::errors::SecretError;

/// Identity aggregate entity.
///
/// Created once at registration and never mutated by this service.
#[derive(Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub identifier: Identifier,
    pub secret_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("identifier", &self.identifier)
            .field("secret_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login handle value type (username or email address).
///
/// Matching is exact: two identifiers are the same only if their bytes are.
/// Values containing `@` are validated as email addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Identifier comparison policy; no case folding is applied anywhere.
    pub const CASE_SENSITIVE: bool = true;

    const MAX_LENGTH: usize = 254;

    /// Create a new valid identifier.
    ///
    /// # Errors
    /// * `Empty` - Identifier is empty
    /// * `TooLong` - Identifier longer than 254 characters
    /// * `InvalidCharacters` - Contains whitespace or control characters
    /// * `InvalidEmail` - Contains `@` but is not a valid email address
    pub fn new(identifier: impl Into<String>) -> Result<Self, IdentifierError> {
        let identifier = identifier.into();

        if identifier.is_empty() {
            return Err(IdentifierError::Empty);
        }

        let length = identifier.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(IdentifierError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if identifier
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(IdentifierError::InvalidCharacters);
        }

        if identifier.contains('@') {
            email_address::EmailAddress::from_str(&identifier)
                .map_err(|e| IdentifierError::InvalidEmail(e.to_string()))?;
        }

        Ok(Self(identifier))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registration password policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub min_secret_length: usize,
}

impl CredentialPolicy {
    pub const DEFAULT_MIN_SECRET_LENGTH: usize = 6;
    pub const MAX_SECRET_LENGTH: usize = 128;

    pub fn new(min_secret_length: usize) -> Self {
        Self { min_secret_length }
    }
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_SECRET_LENGTH)
    }
}

/// Plaintext password that passed the registration policy.
///
/// Never persisted or logged; `Debug` output is redacted.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    /// # Errors
    /// * `TooShort` - Fewer characters than the policy minimum
    /// * `TooLong` - More than 128 characters
    pub fn new(secret: impl Into<String>, policy: &CredentialPolicy) -> Result<Self, SecretError> {
        let secret = secret.into();
        let length = secret.chars().count();

        if length < policy.min_secret_length {
            Err(SecretError::TooShort {
                min: policy.min_secret_length,
                actual: length,
            })
        } else if length > CredentialPolicy::MAX_SECRET_LENGTH {
            Err(SecretError::TooLong {
                max: CredentialPolicy::MAX_SECRET_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(secret))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Identity as returned to callers: the secret hash is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredIdentity {
    pub id: IdentityId,
    pub identifier: Identifier,
    pub created_at: DateTime<Utc>,
}

impl From<Identity> for RegisteredIdentity {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            identifier: identity.identifier,
            created_at: identity.created_at,
        }
    }
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Verified identity facts attached to a guarded request.
///
/// Lives in the request extensions for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub subject: IdentityId,
    pub identifier: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
