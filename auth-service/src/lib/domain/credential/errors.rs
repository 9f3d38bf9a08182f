use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must not be empty")]
    Empty,
}

/// Error raised by a credential store.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Credentials already registered for {0}")]
    AlreadyExists(String),

    #[error("No credentials registered")]
    NotFound,

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Top-level error for signup and login.
///
/// Unknown identities and wrong passwords both surface as
/// `AuthenticationFailed`; there is no variant that tells them apart.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("User already exists")]
    AlreadyExists(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::AlreadyExists(email) => AuthError::AlreadyExists(email),
            CredentialError::NotFound => AuthError::AuthenticationFailed,
            CredentialError::Password(e) => AuthError::Password(e),
            CredentialError::Unknown(msg) => AuthError::Unknown(msg),
        }
    }
}
