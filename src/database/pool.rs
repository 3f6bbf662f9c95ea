use crate::settings::DatabaseSettings;
use color_eyre::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// Open a connection pool and run any pending migrations.
///
/// # Errors
///
/// * The connection string can fail to parse.
/// * Opening the database or applying migrations can fail.
pub async fn get_db_pool(settings: &DatabaseSettings) -> Result<SqlitePool> {
    info!("Connecting to database.");
    let options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}
