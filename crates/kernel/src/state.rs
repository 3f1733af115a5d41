//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::db;
use crate::listing::{CriteriaHookRegistry, ListingService};
use crate::security::NonceService;
use crate::store::{ContentStore, MemoryContentStore, PgContentStore, read_seed_file};
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,

    /// Course content backend.
    store: Arc<dyn ContentStore>,

    /// Listing service for `GET /courses`.
    listing: ListingService,

    /// Request nonce issuer and verifier.
    nonces: NonceService,

    /// Theme engine for the grid page.
    theme: ThemeEngine,
}

impl AppState {
    /// Create application state from configuration, connecting the store.
    pub async fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn ContentStore> = match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url, config.database_max_connections)
                    .await
                    .context("failed to create database pool")?;
                db::run_migrations(&pool)
                    .await
                    .context("failed to run migrations")?;
                let store = PgContentStore::new(pool);
                if let Some(path) = &config.seed_file {
                    for record in read_seed_file(path)? {
                        store.upsert(&record).await?;
                    }
                }
                info!("using PostgreSQL content store");
                Arc::new(store)
            }
            None => {
                let store = match &config.seed_file {
                    Some(path) => MemoryContentStore::from_json_file(path)?,
                    None => MemoryContentStore::default(),
                };
                info!(courses = store.len(), "using in-memory content store");
                Arc::new(store)
            }
        };

        Self::with_store(config, store, CriteriaHookRegistry::new())
    }

    /// Create application state around an existing store and hook registry.
    pub fn with_store(
        config: Config,
        store: Arc<dyn ContentStore>,
        hooks: CriteriaHookRegistry,
    ) -> Result<Self> {
        let nonces = match &config.nonce_secret {
            Some(secret) => NonceService::new(secret.as_bytes().to_vec(), config.nonce_lifetime_secs),
            None => {
                warn!("NONCE_SECRET not set, using a random key; nonces will not survive restarts");
                NonceService::ephemeral(config.nonce_lifetime_secs)
            }
        };

        let listing = ListingService::new(
            store.clone(),
            Arc::new(hooks),
            config.listing_limits(),
            config.site_url.clone(),
        );

        let theme = ThemeEngine::new().context("failed to initialize theme engine")?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                listing,
                nonces,
                theme,
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.inner.store
    }

    pub fn listing(&self) -> &ListingService {
        &self.inner.listing
    }

    pub fn nonces(&self) -> &NonceService {
        &self.inner.nonces
    }

    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }
}
