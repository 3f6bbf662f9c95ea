use color_eyre::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub pagination: PaginationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_expiry_minutes: i64,
}

/// Page sizes for the list endpoints.
#[derive(Debug, Deserialize, Clone)]
pub struct PaginationSettings {
    pub albums_per_page: i64,
    pub images_per_page: i64,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Load settings from `config/settings.yaml`, overridable through
/// `IMAGESTORE`-prefixed environment variables (`IMAGESTORE__API__PORT=8080`).
///
/// Defaults: host `0.0.0.0`, port `3210`, `sqlite:imagestore.db`, 20 albums
/// and 20 images per page. The JWT secret has no default and must come from
/// the config file or the environment.
pub fn load_app_settings() -> Result<AppSettings> {
    dotenv::from_path(".env").ok();

    let builder = config::Config::builder()
        .set_default("api.host", "0.0.0.0")?
        .set_default("api.port", 3210_i64)?
        .set_default("database.url", "sqlite:imagestore.db")?
        .set_default("database.max_connections", 5_i64)?
        .set_default("auth.token_expiry_minutes", 24_i64 * 60)?
        .set_default("pagination.albums_per_page", 20_i64)?
        .set_default("pagination.images_per_page", 20_i64)?
        .set_default("logging.level", "info")?
        .add_source(config::File::with_name("config/settings").required(false))
        .add_source(
            config::Environment::with_prefix("IMAGESTORE")
                .separator("__")
                .try_parsing(true),
        );

    Ok(builder.build()?.try_deserialize::<AppSettings>()?)
}
