//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use coursegrid_sdk::types::DEFAULT_PER_PAGE;

use crate::listing::ListingLimits;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL. When None, the in-memory store is used.
    pub database_url: Option<String>,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// JSON seed file for the in-memory store.
    pub seed_file: Option<PathBuf>,

    /// Public site URL for permalinks and the widget endpoint.
    pub site_url: String,

    /// Deployment environment: "production" (default) or "development".
    pub app_env: String,

    /// Bearer token identifying privileged callers.
    pub admin_token: Option<String>,

    /// HMAC key for request nonces. When None, a random key is generated.
    pub nonce_secret: Option<String>,

    /// Nonce validity window in seconds (default: 86400).
    pub nonce_lifetime_secs: u64,

    /// Page size when the client sends none (default: 12).
    pub listing_default_per_page: u32,

    /// Largest page size served (default: 100).
    pub listing_max_per_page: u32,

    /// Grid columns in the page scaffold (default: 3).
    pub grid_columns: u32,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url = non_empty("DATABASE_URL");

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let seed_file = non_empty("SEED_FILE").map(PathBuf::from);

        let site_url = non_empty("SITE_URL").unwrap_or_else(|| format!("http://localhost:{port}"));

        let app_env = env::var("APP_ENV")
            .unwrap_or_else(|_| "production".to_string())
            .to_lowercase();

        let admin_token = non_empty("ADMIN_TOKEN");
        let nonce_secret = non_empty("NONCE_SECRET");

        let nonce_lifetime_secs = env::var("NONCE_LIFETIME_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .context("NONCE_LIFETIME_SECS must be a valid u64")?;

        let listing_default_per_page: u32 = env::var("LISTING_DEFAULT_PER_PAGE")
            .unwrap_or_else(|_| DEFAULT_PER_PAGE.to_string())
            .parse()
            .context("LISTING_DEFAULT_PER_PAGE must be a valid u32")?;
        anyhow::ensure!(
            listing_default_per_page > 0,
            "LISTING_DEFAULT_PER_PAGE must be positive"
        );

        let listing_max_per_page: u32 = env::var("LISTING_MAX_PER_PAGE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .context("LISTING_MAX_PER_PAGE must be a valid u32")?;
        anyhow::ensure!(
            listing_max_per_page >= listing_default_per_page,
            "LISTING_MAX_PER_PAGE must be at least LISTING_DEFAULT_PER_PAGE"
        );

        let grid_columns = env::var("GRID_COLUMNS")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .context("GRID_COLUMNS must be a valid u32")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            seed_file,
            site_url,
            app_env,
            admin_token,
            nonce_secret,
            nonce_lifetime_secs,
            listing_default_per_page,
            listing_max_per_page,
            grid_columns,
            cors_allowed_origins,
        })
    }

    /// Whether debug diagnostics may be exposed at all.
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// Page size bounds for the listing service.
    pub fn listing_limits(&self) -> ListingLimits {
        ListingLimits {
            default_per_page: self.listing_default_per_page,
            max_per_page: self.listing_max_per_page,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            database_max_connections: 10,
            seed_file: None,
            site_url: "http://localhost:3000".to_string(),
            app_env: "production".to_string(),
            admin_token: None,
            nonce_secret: None,
            nonce_lifetime_secs: 86_400,
            listing_default_per_page: DEFAULT_PER_PAGE,
            listing_max_per_page: 100,
            grid_columns: 3,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
