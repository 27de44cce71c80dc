//! Command implementations for the `mensa` binary
//!
//! Each command writes its output to the given writer so tests can capture it.

pub mod groups;
pub mod price;

use std::sync::Arc;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::DiscountGroupRepository;
use crate::discount::DiscountEngine;
use crate::services::DiscountGroupService;
use crate::utils::AppResult;

/// Everything a command needs: one engine and the service sharing it
#[derive(Debug, Clone)]
pub struct AppContext {
    pub service: DiscountGroupService,
}

impl AppContext {
    /// Open the configured database and wire the engine to it
    pub async fn open(config: &Config) -> AppResult<Self> {
        let path = config.database_path();
        let db = DbService::new(&path.to_string_lossy()).await?;
        Ok(Self::from_db(&db, config))
    }

    pub fn from_db(db: &DbService, config: &Config) -> Self {
        let repo = DiscountGroupRepository::new(db.pool.clone());
        let engine = DiscountEngine::with_ttl(Arc::new(repo.clone()), config.cache_ttl());
        Self {
            service: DiscountGroupService::new(repo, engine),
        }
    }

    pub fn engine(&self) -> &DiscountEngine {
        self.service.engine()
    }
}

/// Round for display; calculations stay unrounded
pub(crate) fn money(value: f64) -> String {
    format!("{value:.2}")
}
