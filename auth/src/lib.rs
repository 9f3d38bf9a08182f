//! Credential primitives shared by the authentication service.
//!
//! - Password hashing (Argon2id, per-record random salt, tunable cost)
//! - JWT signing and verification (HMAC family)
//! - Token issuance with expiry evaluated against an injectable clock
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(1024, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Issuing and Validating Tokens
//! ```
//! use auth::{JwtHandler, TokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(
//!     JwtHandler::new(b"secret_key_at_least_32_bytes_long!"),
//!     Duration::minutes(60),
//! );
//!
//! let token = issuer.issue_default("alice@example.com").unwrap();
//! let subject = issuer.validate(&token.access_token).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```

pub mod clock;
pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
