use async_trait::async_trait;
use auth::IssuedToken;

use crate::credential::errors::AuthError;
use crate::credential::errors::CredentialError;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;
use crate::credential::models::Password;
use crate::credential::models::SignupCommand;

/// Port for signup and login operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated email and password
    ///
    /// # Returns
    /// Signed bearer token for the new identity
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `Token` - Token signing failed
    async fn signup(&self, command: SignupCommand) -> Result<IssuedToken, AuthError>;

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `command` - Email and password to check
    ///
    /// # Returns
    /// Signed bearer token for the identity
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown email or wrong password (indistinguishable)
    /// * `Password` - Stored verifier could not be checked
    /// * `Token` - Token signing failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, AuthError>;
}

/// Storage of password verifiers keyed by email.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Hash `password` and store it for `email`.
    ///
    /// The existence check and the insert are one atomic step: of several
    /// concurrent registrations for the same email, exactly one succeeds.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered; the stored record is untouched
    /// * `Password` - Hashing failed
    async fn register(&self, email: &EmailAddress, password: &Password)
        -> Result<(), CredentialError>;

    /// Check `password` against the verifier stored for `email`.
    ///
    /// # Returns
    /// Whether the password matches
    ///
    /// # Errors
    /// * `NotFound` - No record for `email`
    /// * `Password` - Stored verifier is unreadable
    async fn verify(&self, email: &EmailAddress, password: &Password)
        -> Result<bool, CredentialError>;
}
