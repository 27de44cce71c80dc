//! Where the engine reads discount groups from

use async_trait::async_trait;
use shared::models::DiscountGroup;

use crate::db::repository::{DiscountGroupRepository, RepoResult};

/// Read access to the full discount group list
#[async_trait]
pub trait DiscountGroupSource: Send + Sync {
    /// Every group, ordered by name ascending
    async fn fetch_all_ordered_by_name(&self) -> RepoResult<Vec<DiscountGroup>>;
}

#[async_trait]
impl DiscountGroupSource for DiscountGroupRepository {
    async fn fetch_all_ordered_by_name(&self) -> RepoResult<Vec<DiscountGroup>> {
        self.find_all().await
    }
}
