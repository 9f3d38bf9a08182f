use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::jwt::TokenError;

/// Mints and validates stateless bearer tokens.
///
/// A token is valid iff its signature verifies under the configured secret
/// and the clock has not passed its `exp`. There is no server-side session
/// record and no revocation.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS string
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Create a token issuer reading the wall clock.
    ///
    /// # Arguments
    /// * `jwt_handler` - Signing handler holding the secret
    /// * `default_ttl` - Lifetime used by [`issue_default`](Self::issue_default)
    pub fn new(jwt_handler: JwtHandler, default_ttl: Duration) -> Self {
        Self {
            jwt_handler,
            clock: Arc::new(SystemClock),
            default_ttl,
        }
    }

    /// Replace the clock used for `iat` and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign a token for `subject` that expires `ttl` from now.
    ///
    /// # Errors
    /// * `MissingClaim` - Subject is empty
    /// * `InvalidTtl` - `ttl` is shorter than a second, or expiry falls outside the representable range
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, JwtError> {
        if subject.is_empty() {
            return Err(JwtError::MissingClaim("sub".to_string()));
        }

        // Claims carry whole seconds
        let ttl = Duration::seconds(ttl.num_seconds());
        if ttl <= Duration::zero() {
            return Err(JwtError::InvalidTtl(ttl.num_seconds()));
        }

        let issued_at = self.clock.now().trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(JwtError::InvalidTtl(ttl.num_seconds()))?;

        let claims = TokenClaims::new(subject, issued_at, ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    /// Sign a token for `subject` with the configured default lifetime.
    pub fn issue_default(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.issue(subject, self.default_ttl)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be decoded, carries an empty subject or an out-of-range `exp`
    /// * `BadSignature` - Signature does not verify against the secret
    /// * `Expired` - Current time is past `exp`
    pub fn validate_claims(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims: TokenClaims = self.jwt_handler.decode(token)?;

        if claims.sub.is_empty() {
            return Err(TokenError::Malformed);
        }
        if claims.expires_at().is_none() {
            return Err(TokenError::Malformed);
        }
        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Validate a token and return the subject it was issued for.
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        self.validate_claims(token).map(|claims| claims.sub)
    }
}
