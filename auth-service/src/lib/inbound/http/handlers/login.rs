use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;
use crate::credential::models::Password;
use crate::credential::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    // Input that could never have been registered fails like any other bad login.
    let email = EmailAddress::new(body.email).map_err(|_| ApiError::authentication_failed())?;
    let password = Password::new(body.password).map_err(|_| ApiError::authentication_failed())?;

    state
        .auth_service
        .login(LoginCommand::new(email, password))
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
