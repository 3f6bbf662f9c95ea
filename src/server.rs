use crate::geo::DbGeoLookup;
use crate::routes::create_router;
use crate::settings::AppSettings;
use crate::state::ApiContext;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub async fn serve(pool: SqlitePool, settings: AppSettings) -> Result<()> {
    info!("Initializing server...");
    let context = ApiContext {
        geo: Arc::new(DbGeoLookup::new(pool.clone())),
        pool,
        settings: settings.clone(),
    };

    let app = create_router(context);

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {e}"))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
