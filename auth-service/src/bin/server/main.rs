use std::sync::Arc;

use auth::JwtHandler;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth_service::config::Config;
use auth_service::credential::service::AuthService;
use auth_service::inbound::http::router::cors_layer;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryCredentialStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        allowed_origins = ?config.server.allowed_origins,
        jwt_algorithm = ?config.jwt.algorithm,
        jwt_expiration_minutes = config.jwt.expiration_minutes,
        argon2_memory_kib = config.password.memory_kib,
        argon2_iterations = config.password.iterations,
        argon2_parallelism = config.password.parallelism,
        "Configuration loaded"
    );

    let jwt_handler =
        JwtHandler::with_algorithm(config.jwt.secret.as_bytes(), config.jwt.algorithm)?;
    let signing_algorithm = jwt_handler.algorithm();
    let token_issuer = Arc::new(TokenIssuer::new(jwt_handler, config.jwt.ttl()));
    tracing::info!(
        algorithm = ?signing_algorithm,
        default_ttl_minutes = token_issuer.default_ttl().num_minutes(),
        "Token issuer ready"
    );

    let password_hasher = PasswordHasher::with_cost(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let credential_store = Arc::new(InMemoryCredentialStore::new(password_hasher)?);
    tracing::info!(store = "in-memory", "Credential store ready");

    let auth_service = Arc::new(AuthService::new(
        credential_store,
        Arc::clone(&token_issuer),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        token_issuer,
        cors_layer(&config.server.allowed_origins)?,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
