use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use bookstore_api::app::create_app;
use bookstore_api::config::Config;
use bookstore_api::middleware::{init_metrics, logging::init_logging};
use bookstore_api::services::admin_bootstrap::{bootstrap_admin, BootstrapOutcome};
use bookstore_api::services::EmailService;
use persistence::repositories::RoleRepository;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load().context("Failed to load configuration")?;

    init_logging(&config.logging);
    init_metrics().context("Failed to install Prometheus recorder")?;

    info!("Starting Bookstore API v{}", env!("CARGO_PKG_VERSION"));

    let db_config = persistence::db::DatabaseConfig::from(&config.database);
    let pool = persistence::db::create_pool(&db_config)
        .await
        .context("Failed to connect to the database")?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    if let BootstrapOutcome::Created(user_id) = bootstrap_admin(&pool, &config.admin).await? {
        info!(user_id, "Administrator account bootstrapped");
    }

    let roles = RoleRepository::new(pool.clone()).load_table().await?;
    info!(roles = roles.len(), "Role table loaded");

    let mailer = Arc::new(EmailService::new(config.email.clone()));
    let addr = config.socket_addr()?;
    let app = create_app(config, pool, roles, mailer)?;

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
