use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by every access token.
///
/// All fields are required; a token missing any of them does not decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (the email the token was issued for)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl TokenClaims {
    /// Create claims for `subject`, valid from `issued_at` for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token is issued for
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with `exp = iat + ttl` and a random `jti`
    pub fn new(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: subject.to_string(),
            iat,
            exp: iat + ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expiry instant, `None` if `exp` is outside the calendar range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if token is expired at `now`.
    ///
    /// A token is still valid at exactly its `exp` instant and expired any
    /// time after it, including within the same second.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map_or(true, |expires_at| now > expires_at)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_new_claims() {
        let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let claims = TokenClaims::new("alice@example.com", issued_at, Duration::minutes(60));

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 60 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_jti_is_unique() {
        let issued_at = Utc::now();
        let first = TokenClaims::new("alice@example.com", issued_at, Duration::minutes(5));
        let second = TokenClaims::new("alice@example.com", issued_at, Duration::minutes(5));

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_is_expired() {
        let claims = TokenClaims {
            sub: "alice@example.com".to_string(),
            iat: 400,
            exp: 1000,
            jti: "id".to_string(),
        };

        let at = |secs: i64, millis: i64| {
            DateTime::from_timestamp(secs, 0).unwrap() + Duration::milliseconds(millis)
        };

        assert!(!claims.is_expired(at(999, 0))); // Not expired
        assert!(!claims.is_expired(at(1000, 0))); // Exactly at expiration
        assert!(claims.is_expired(at(1000, 1))); // Just past it
        assert!(claims.is_expired(at(1001, 0)));
    }

    #[test]
    fn test_out_of_range_exp() {
        let claims = TokenClaims {
            sub: "alice@example.com".to_string(),
            iat: 400,
            exp: i64::MAX,
            jti: "id".to_string(),
        };

        assert_eq!(claims.expires_at(), None);
        assert!(claims.is_expired(Utc::now()));
    }
}
