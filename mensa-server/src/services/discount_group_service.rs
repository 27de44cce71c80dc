//! Discount Group Service
//!
//! Admin operations for discount groups. Every successful mutation clears the
//! engine's group cache before returning, so the next price calculation sees
//! the new data.
//!
//! Mutations run one at a time so the case-insensitive name check and the
//! write cannot interleave with another mutation in this process. The unique
//! index on `lower(name)` covers writers outside it for ASCII names.

use std::sync::Arc;

use shared::models::{DiscountGroup, DiscountGroupCreate, DiscountGroupUpdate};

use crate::db::repository::DiscountGroupRepository;
use crate::discount::DiscountEngine;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_GROUP_NAME_LEN, validate_percentage, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct DiscountGroupService {
    repo: DiscountGroupRepository,
    engine: DiscountEngine,
    write_lock: Arc<Mutex<()>>,
}

impl DiscountGroupService {
    pub fn new(repo: DiscountGroupRepository, engine: DiscountEngine) -> Self {
        Self {
            repo,
            engine,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn engine(&self) -> &DiscountEngine {
        &self.engine
    }

    /// All groups straight from the store, ordered by name
    pub async fn list(&self) -> AppResult<Vec<DiscountGroup>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<DiscountGroup> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| group_not_found(id))
    }

    pub async fn create(&self, data: DiscountGroupCreate) -> AppResult<DiscountGroup> {
        validate_required_text(&data.name, "name", MAX_GROUP_NAME_LEN)?;
        validate_required_text(&data.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_percentage(data.discount_percentage, "discount_percentage")?;

        let _guard = self.write_lock.lock().await;
        self.ensure_name_free(&data.name, None).await?;

        let group = self.repo.create(data).await?;
        self.engine.invalidate_cache();

        tracing::info!(
            id = %group.id,
            name = %group.name,
            discount_percentage = group.discount_percentage,
            "Discount group created"
        );
        Ok(group)
    }

    pub async fn update(&self, id: &str, data: DiscountGroupUpdate) -> AppResult<DiscountGroup> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_GROUP_NAME_LEN)?;
        }
        if let Some(description) = &data.description {
            validate_required_text(description, "description", MAX_DESCRIPTION_LEN)?;
        }
        if let Some(pct) = data.discount_percentage {
            validate_percentage(pct, "discount_percentage")?;
        }

        let _guard = self.write_lock.lock().await;
        let existing = self.get(id).await?;
        if let Some(name) = &data.name {
            self.ensure_name_free(name, Some(&existing.id)).await?;
        }

        let group = self.repo.update(id, data).await?;
        self.engine.invalidate_cache();

        tracing::info!(
            id = %group.id,
            name = %group.name,
            discount_percentage = group.discount_percentage,
            "Discount group updated"
        );
        Ok(group)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        if !self.repo.delete(id).await? {
            return Err(group_not_found(id));
        }
        self.engine.invalidate_cache();

        tracing::info!(id = %id, "Discount group deleted");
        Ok(())
    }

    /// Names collide case-insensitively because lookups ignore case
    async fn ensure_name_free(&self, name: &str, own_id: Option<&str>) -> AppResult<()> {
        if let Some(other) = self.repo.find_by_name(name).await?
            && Some(other.id.as_str()) != own_id
        {
            return Err(AppError::with_message(
                ErrorCode::DiscountGroupNameExists,
                format!("Discount group '{}' already exists", other.name),
            )
            .with_detail("name", name));
        }
        Ok(())
    }
}

fn group_not_found(id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::DiscountGroupNotFound,
        format!("Discount group {id} not found"),
    )
    .with_detail("id", id)
}
