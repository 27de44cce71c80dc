//! Discount Group Repository

use super::{RepoError, RepoResult};
use shared::models::{DiscountGroup, DiscountGroupCreate, DiscountGroupUpdate};
use sqlx::SqlitePool;

const SELECT_COLUMNS: &str =
    "SELECT id, name, description, discount_percentage, created_at, updated_at FROM discount_group";

#[derive(Clone)]
pub struct DiscountGroupRepository {
    pool: SqlitePool,
}

impl std::fmt::Debug for DiscountGroupRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountGroupRepository")
            .field("pool", &"<SqlitePool>")
            .finish()
    }
}

impl DiscountGroupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All groups ordered by name (binary collation, as stored)
    pub async fn find_all(&self) -> RepoResult<Vec<DiscountGroup>> {
        let rows = sqlx::query_as::<_, DiscountGroup>(&format!("{SELECT_COLUMNS} ORDER BY name"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiscountGroup>> {
        let row = sqlx::query_as::<_, DiscountGroup>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Case-insensitive name lookup.
    ///
    /// Done in Rust: SQLite's NOCASE collation only folds ASCII, so
    /// "SCHÜLER" would not match "Schüler".
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<DiscountGroup>> {
        let groups = self.find_all().await?;
        Ok(groups.into_iter().find(|g| g.name_matches(name)))
    }

    pub async fn create(&self, data: DiscountGroupCreate) -> RepoResult<DiscountGroup> {
        let now = shared::util::now_millis();
        let id = shared::util::new_id();
        sqlx::query(
            "INSERT INTO discount_group (id, name, description, discount_percentage, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        )
        .bind(&id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.discount_percentage)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create discount group".into()))
    }

    pub async fn update(&self, id: &str, data: DiscountGroupUpdate) -> RepoResult<DiscountGroup> {
        let now = shared::util::now_millis();
        let rows = sqlx::query(
            "UPDATE discount_group SET name = COALESCE(?1, name), description = COALESCE(?2, description), discount_percentage = COALESCE(?3, discount_percentage), updated_at = ?4 WHERE id = ?5",
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.discount_percentage)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if rows.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Discount group {id} not found")));
        }
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Discount group {id} not found")))
    }

    /// Hard delete. Returns `false` when no row matched.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM discount_group WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(rows.rows_affected() > 0)
    }
}
