/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = std::path::PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with SHELF_)
        settings = settings.add_source(
            config::Environment::with_prefix("SHELF")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set SHELF_AUTH_JWT_SECRET)".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/shelf.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
        }
    }
}
