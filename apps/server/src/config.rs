use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use pure_hearts_core::constants::{DEFAULT_FEATURED_PROJECTS, DEFAULT_IMAGE_MAX_BYTES};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "./db/app.db";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// HS256 secret for bearer tokens. Authenticated routes reject everything without it.
    pub jwt_secret: Option<String>,
    pub featured_limit: usize,
    pub image_max_bytes: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: DEFAULT_DB_PATH.to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            jwt_secret: None,
            featured_limit: DEFAULT_FEATURED_PROJECTS,
            image_max_bytes: DEFAULT_IMAGE_MAX_BYTES,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup. Unparsable values fall
    /// back to their defaults, except the listen address.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr_raw =
            var("PH_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_addr_raw
            .parse()
            .with_context(|| format!("Invalid PH_LISTEN_ADDR: {listen_addr_raw}"))?;
        let db_path = var("PH_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.into());
        let cors_allow = var("PH_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("PH_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        let jwt_secret = var("PH_JWT_SECRET")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let featured_limit = var("PH_FEATURED_LIMIT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_FEATURED_PROJECTS);
        let image_max_bytes = var("PH_IMAGE_MAX_BYTES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_IMAGE_MAX_BYTES);
        let log_format = match var("PH_LOG_FORMAT").as_deref().map(str::trim) {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            featured_limit,
            image_max_bytes,
            log_format,
        })
    }
}
