use std::sync::Arc;

use async_trait::async_trait;
use auth::IssuedToken;
use auth::TokenIssuer;

use crate::credential::errors::AuthError;
use crate::credential::errors::CredentialError;
use crate::credential::models::LoginCommand;
use crate::credential::models::SignupCommand;
use crate::credential::ports::AuthServicePort;
use crate::credential::ports::CredentialStore;

/// Domain service implementation for signup and login.
///
/// Resolves the identity against the credential store, then mints a token.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    token_issuer: Arc<TokenIssuer>,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential store implementation
    /// * `token_issuer` - Shared token issuer holding the signing secret
    pub fn new(store: Arc<CS>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            store,
            token_issuer,
        }
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn signup(&self, command: SignupCommand) -> Result<IssuedToken, AuthError> {
        self.store
            .register(&command.email, &command.password)
            .await?;

        tracing::info!(email = %command.email, "Credentials registered");

        let token = self.token_issuer.issue_default(command.email.as_str())?;

        Ok(token)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, AuthError> {
        match self
            .store
            .verify(&command.email, &command.password)
            .await
        {
            Ok(true) => {}
            Ok(false) | Err(CredentialError::NotFound) => {
                tracing::info!(email = %command.email, "Login rejected");
                return Err(AuthError::AuthenticationFailed);
            }
            Err(e) => return Err(e.into()),
        }

        let token = self.token_issuer.issue_default(command.email.as_str())?;

        Ok(token)
    }
}
