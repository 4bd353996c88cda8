use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use secrecy::ExposeSecret;
use user_api::{AppState, app, load_config, services::UserService, storage::PgUserStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_config()?;
    tracing::info!(min_age = config.user.min_age, "configuration loaded");

    let pool = sqlx::PgPool::connect(config.database.connection_string().expose_secret()).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = Arc::new(PgUserStore::new(pool));
    let service = UserService::new(store, config.user.min_age);
    let state = AppState::new(service);

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
