use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// Derived from a verified identity at login and never persisted; they only
/// exist inside a signed token. Every field is required, so a token missing
/// any of them fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (identity record id)
    pub sub: String,

    /// Human-readable identifier the subject logged in with
    pub identifier: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims issued at `issued_at` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Identity record id
    /// * `identifier` - Login handle of the identity
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    pub fn new(
        subject: impl ToString,
        identifier: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: subject.to_string(),
            identifier: identifier.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token stops being valid exactly at its expiry second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let now = Utc::now();
        let claims = SessionClaims::new("user123", "alice", now, Duration::hours(1));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.identifier, "alice");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let issued = Utc.timestamp_opt(0, 0).unwrap();
        let claims = SessionClaims::new("user123", "alice", issued, Duration::seconds(1000));

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_timestamps_round_trip_to_datetime() {
        let issued = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = SessionClaims::new("user123", "alice", issued, Duration::minutes(5));

        assert_eq!(claims.issued_at(), Some(issued));
        assert_eq!(claims.expires_at(), Some(issued + Duration::minutes(5)));
    }

    #[test]
    fn test_missing_field_does_not_deserialize() {
        let json = r#"{"sub":"user123","iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<SessionClaims>(json).is_err());
    }
}
