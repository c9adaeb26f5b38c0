//! Idempotently creates the initial admin account.

use anyhow::Context;
use car_rental_api::config::Config;
use car_rental_api::constants::API_NAME;
use car_rental_api::repository::AdminRepository;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let admins = AdminRepository::new(pool);
    if admins.find_by_username("admin").await?.is_some() {
        tracing::info!("{} Admin already exists", API_NAME);
        return Ok(());
    }

    let hash = bcrypt::hash("admin123", bcrypt::DEFAULT_COST)?;
    admins.insert("admin", &hash).await?;
    tracing::info!("{} Admin created: username=admin, password=admin123", API_NAME);

    Ok(())
}
