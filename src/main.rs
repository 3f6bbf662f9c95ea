use color_eyre::Result;
use imagestore::database::pool::get_db_pool;
use imagestore::server::serve;
use imagestore::settings::load_app_settings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = load_app_settings()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&settings.logging.level)?)
        .init();

    let pool = get_db_pool(&settings.database).await?;
    serve(pool, settings).await
}
