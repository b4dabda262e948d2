use thiserror::Error;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Identifier validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Identifier must not be empty")]
    Empty,

    #[error("Identifier too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Identifier must not contain whitespace or control characters")]
    InvalidCharacters,

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),
}

/// Error for Secret policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Input rejected before any I/O
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid identifier: {0}")]
    Identifier(#[from] IdentifierError),

    #[error("Invalid password: {0}")]
    Secret(#[from] SecretError),
}

/// Error reported by a credential store adapter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store's uniqueness constraint rejected the write.
    #[error("Identifier already stored: {0}")]
    Conflict(String),

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),

    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),
}

/// Error for identity registry operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Identity already exists: {0}")]
    AlreadyExists(String),

    #[error("Identity not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(identifier) => RegistryError::AlreadyExists(identifier),
            other => RegistryError::Store(other),
        }
    }
}

/// Public error surface of the authentication service.
///
/// Messages are fixed strings: nothing about store state, hashing, or token
/// internals reaches the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Identifier is already registered")]
    DuplicateIdentity,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing credential")]
    MissingCredential,

    #[error("Invalid or expired credential")]
    InvalidCredential,

    #[error("An unexpected error occurred")]
    InternalFault,
}

impl AuthError {
    /// Log `cause` with full detail and collapse it into `InternalFault`.
    pub fn internal(context: &str, cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "{}", context);
        AuthError::InternalFault
    }
}

impl From<IdentifierError> for AuthError {
    fn from(err: IdentifierError) -> Self {
        AuthError::Validation(err.into())
    }
}

impl From<SecretError> for AuthError {
    fn from(err: SecretError) -> Self {
        AuthError::Validation(err.into())
    }
}
