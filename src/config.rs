use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default ceiling for a single uploaded image (5 MB)
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Uploads
    pub upload_dir: PathBuf,
    pub max_upload_size: usize,

    // Admin session
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expires_in: String,
    pub admin_username: String,
    #[serde(skip_serializing)]
    pub admin_password: Option<String>,
    pub cookie_secure: bool,

    /// Send `Strict-Transport-Security`; only meaningful when served over HTTPS.
    pub hsts_enabled: bool,
    pub cors_allow_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,

            database_url: "sqlite://data/site.db".to_string(),
            database_max_connections: 5,

            upload_dir: PathBuf::from("uploads"),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,

            jwt_secret: String::new(),
            jwt_expires_in: "7d".to_string(),
            admin_username: "admin".to_string(),
            admin_password: None,
            cookie_secure: false,

            hsts_enabled: false,
            cors_allow_origin: "*".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|e| format!("Invalid port: {}", e))?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }

        if let Some(max) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.database_max_connections = max
                .parse()
                .map_err(|e| format!("Invalid database_max_connections: {}", e))?;
        }

        if let Some(dir) = lookup("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }

        if let Some(size) = lookup("MAX_UPLOAD_SIZE") {
            config.max_upload_size = size
                .parse()
                .map_err(|e| format!("Invalid max_upload_size: {}", e))?;
        }

        match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => config.jwt_secret = secret,
            None => {
                tracing::warn!("JWT_SECRET not set, generating an ephemeral secret; sessions will not survive a restart");
                config.jwt_secret = format!(
                    "{}{}",
                    uuid::Uuid::new_v4().simple(),
                    uuid::Uuid::new_v4().simple()
                );
            }
        }

        if let Some(expires_in) = lookup("JWT_EXPIRES_IN") {
            crate::utils::auth::parse_duration(&expires_in)
                .map_err(|_| format!("Invalid jwt_expires_in: {}", expires_in))?;
            config.jwt_expires_in = expires_in;
        }

        if let Some(username) = lookup("ADMIN_USERNAME") {
            config.admin_username = username;
        }

        config.admin_password = lookup("ADMIN_PASSWORD").filter(|s| !s.is_empty());

        if let Some(secure) = lookup("COOKIE_SECURE") {
            config.cookie_secure = secure
                .parse()
                .map_err(|e| format!("Invalid cookie_secure: {}", e))?;
        }

        if let Some(hsts) = lookup("HSTS_ENABLED") {
            config.hsts_enabled = hsts
                .parse()
                .map_err(|e| format!("Invalid hsts_enabled: {}", e))?;
        }

        if let Some(origin) = lookup("CORS_ALLOW_ORIGIN") {
            config.cors_allow_origin = origin;
        }

        Ok(config)
    }
}
