use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{AtlasError, Result};
use crate::config::Config;
use crate::feed::{FeedConfig, FeedController};
use crate::fetcher::{HttpFetcher, LaunchFetcher};
use crate::store::{KeyValueStore, LikeStore, MemoryStore, SqliteStore};

pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore + Send + Sync>,
    pub fetcher: Arc<dyn LaunchFetcher + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let db_path = match &config.store.path {
            Some(p) => p.clone(),
            None => Self::default_db_path()?,
        };

        let store: Arc<dyn KeyValueStore + Send + Sync> = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_store(config, store)
    }

    /// Likes live only as long as the process.
    pub fn ephemeral(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore + Send + Sync>) -> Result<Self> {
        let fetcher: Arc<dyn LaunchFetcher + Send + Sync> =
            Arc::new(HttpFetcher::new(&config.api)?);

        Ok(Self {
            config,
            store,
            fetcher,
        })
    }

    pub fn likes(&self) -> LikeStore {
        LikeStore::new(self.store.clone())
    }

    /// A fresh controller for one feed session.
    pub fn feed_controller(&self) -> FeedController {
        FeedController::new(
            self.fetcher.clone(),
            self.likes(),
            FeedConfig::from(&self.config),
        )
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AtlasError::Config("Could not find data directory".into()))?;
        let atlas_dir = data_dir.join("launch-atlas");
        std::fs::create_dir_all(&atlas_dir)?;
        Ok(atlas_dir.join("launch-atlas.db"))
    }
}
