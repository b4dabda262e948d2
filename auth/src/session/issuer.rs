use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;

/// A freshly minted session token together with the claims it encodes.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub claims: SessionClaims,
}

/// Mints signed, time-bound session tokens.
///
/// The TTL is fixed at construction; every token gets the same lifetime.
pub struct TokenIssuer {
    handler: JwtHandler,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            ttl,
        }
    }

    /// Issue a token for `subject`, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(
        &self,
        subject: impl ToString,
        identifier: &str,
    ) -> Result<IssuedToken, JwtError> {
        self.issue_at(subject, identifier, Utc::now())
    }

    /// Issue a token as if minted at `issued_at`.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        identifier: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = SessionClaims::new(subject, identifier, issued_at, self.ttl);
        let access_token = self.handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            claims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_fixed_ttl() {
        let issuer = TokenIssuer::new(b"test_secret_key_at_least_32_bytes!", Duration::hours(1));

        let issued = issuer.issue("user123", "alice").expect("Failed to issue");

        assert!(!issued.access_token.is_empty());
        assert_eq!(issued.claims.sub, "user123");
        assert_eq!(issued.claims.identifier, "alice");
        assert_eq!(issued.claims.exp - issued.claims.iat, 3600);
    }

    #[test]
    fn test_issue_at_uses_given_instant() {
        let issuer = TokenIssuer::new(b"test_secret_key_at_least_32_bytes!", Duration::minutes(10));
        let issued_at = Utc::now() - Duration::days(1);

        let issued = issuer
            .issue_at("user123", "alice", issued_at)
            .expect("Failed to issue");

        assert_eq!(issued.claims.iat, issued_at.timestamp());
        assert_eq!(issued.claims.exp, (issued_at + Duration::minutes(10)).timestamp());
    }
}
