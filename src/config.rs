use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Default address of the local analysis backend. The dashboard talks to a
/// fixed local endpoint; `PGX_BACKEND_URL` can point it elsewhere at process
/// start, never at runtime.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            backend: BackendConfig {
                base_url: env::var("PGX_BACKEND_URL")
                    .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
            },
            logging: LoggingConfig {
                directory: env::var("PGX_LOG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("logs")),
                filter: env::var("PGX_LOG_FILTER").unwrap_or_else(|_| "pgx_dash=debug".to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_trailing_slash_is_stripped() {
        std::env::set_var("PGX_BACKEND_URL", "http://127.0.0.1:9000/");
        let config = Config::from_env().unwrap();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:9000");
        std::env::remove_var("PGX_BACKEND_URL");
    }
}
