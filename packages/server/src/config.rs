use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty allows any origin.
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of issued session tokens.
    pub token_ttl_days: i64,
    /// Name of the cookie carrying the session token for browser pages.
    pub session_cookie: String,
}

/// Credentials and endpoints of the hosted image service.
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    #[serde(default)]
    pub cloud_name: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    pub folder: String,
    pub api_base: String,
    pub delivery_base: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub media: MediaConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.token_ttl_days", 7)?
            .set_default("auth.session_cookie", "contentcraft_session")?
            .set_default("media.folder", "contentcraft")?
            .set_default("media.api_base", "https://api.cloudinary.com/v1_1")?
            .set_default("media.delivery_base", "https://res.cloudinary.com")?
            .set_default("media.max_upload_bytes", 10 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CONTENTCRAFT__MEDIA__CLOUD_NAME)
            .add_source(
                Environment::with_prefix("CONTENTCRAFT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.media.ensure_present()?;
        Ok(config)
    }
}

impl MediaConfig {
    /// The image service cannot be addressed without a cloud name.
    pub fn ensure_present(&self) -> Result<(), ConfigError> {
        if self.cloud_name.trim().is_empty() {
            return Err(ConfigError::Message(
                "Missing media.cloud_name (set CONTENTCRAFT__MEDIA__CLOUD_NAME)".into(),
            ));
        }
        Ok(())
    }
}
