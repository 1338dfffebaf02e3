//! MySQL category repository implementation.

use super::parse_id;
use crate::{traits::CategoryRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rated_core::{
    Category, CategoryId, RatedError, RatedResult, TopCategory, TopCategoryId,
};
use sqlx::{FromRow, MySql, Transaction};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

/// MySQL category repository implementation.
#[derive(Clone)]
pub struct MySqlCategoryRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCategoryRepository {
    /// Creates a new MySQL category repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn top_categories_of(&self, id: CategoryId) -> RatedResult<BTreeSet<TopCategoryId>> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT top_category_id FROM top_category_categories WHERE category_id = ?",
        )
        .bind(id.to_string())
        .fetch_all(self.pool.inner())
        .await?;

        ids.iter().map(|id| parse_id(id)).collect()
    }

    async fn categories_of(&self, id: TopCategoryId) -> RatedResult<BTreeSet<CategoryId>> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT category_id FROM top_category_categories WHERE top_category_id = ?",
        )
        .bind(id.to_string())
        .fetch_all(self.pool.inner())
        .await?;

        ids.iter().map(|id| parse_id(id)).collect()
    }

    /// Loads every membership link, keyed by top category.
    async fn all_links(&self) -> RatedResult<Vec<(TopCategoryId, CategoryId)>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT top_category_id, category_id FROM top_category_categories")
                .fetch_all(self.pool.inner())
                .await?;

        rows.iter()
            .map(|(top, category)| Ok((parse_id(top)?, parse_id(category)?)))
            .collect()
    }
}

/// Row shape shared by `categories` and `top_categories`.
#[derive(Debug, FromRow)]
struct NamedRow {
    id: String,
    name: String,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NamedRow {
    fn into_category(self, top_category_ids: BTreeSet<TopCategoryId>) -> RatedResult<Category> {
        Ok(Category {
            id: parse_id(&self.id)?,
            name: self.name,
            top_category_ids,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    fn into_top_category(self, category_ids: BTreeSet<CategoryId>) -> RatedResult<TopCategory> {
        Ok(TopCategory {
            id: parse_id(&self.id)?,
            name: self.name,
            category_ids,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

async fn replace_links_of_category(
    tx: &mut Transaction<'_, MySql>,
    category: &Category,
) -> RatedResult<()> {
    sqlx::query("DELETE FROM top_category_categories WHERE category_id = ?")
        .bind(category.id.to_string())
        .execute(&mut **tx)
        .await?;
    for top in &category.top_category_ids {
        sqlx::query("INSERT INTO top_category_categories (top_category_id, category_id) VALUES (?, ?)")
            .bind(top.to_string())
            .bind(category.id.to_string())
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn replace_links_of_top_category(
    tx: &mut Transaction<'_, MySql>,
    top_category: &TopCategory,
) -> RatedResult<()> {
    sqlx::query("DELETE FROM top_category_categories WHERE top_category_id = ?")
        .bind(top_category.id.to_string())
        .execute(&mut **tx)
        .await?;
    for category in &top_category.category_ids {
        sqlx::query("INSERT INTO top_category_categories (top_category_id, category_id) VALUES (?, ?)")
            .bind(top_category.id.to_string())
            .bind(category.to_string())
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn commit(tx: Transaction<'_, MySql>) -> RatedResult<()> {
    tx.commit()
        .await
        .map_err(|e| RatedError::Database(format!("Failed to commit: {e}")))
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn find_category(&self, id: CategoryId) -> RatedResult<Option<Category>> {
        debug!("Finding category by id: {}", id);

        let row = sqlx::query_as::<_, NamedRow>(
            "SELECT id, name, deleted_at, created_at, updated_at FROM categories WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        match row {
            Some(row) => {
                let tops = self.top_categories_of(id).await?;
                row.into_category(tops).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn find_top_category(&self, id: TopCategoryId) -> RatedResult<Option<TopCategory>> {
        debug!("Finding top category by id: {}", id);

        let row = sqlx::query_as::<_, NamedRow>(
            "SELECT id, name, deleted_at, created_at, updated_at FROM top_categories WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        match row {
            Some(row) => {
                let members = self.categories_of(id).await?;
                row.into_top_category(members).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn list_categories(&self) -> RatedResult<Vec<Category>> {
        debug!("Listing categories");

        let rows = sqlx::query_as::<_, NamedRow>(
            r#"
            SELECT id, name, deleted_at, created_at, updated_at
            FROM categories
            WHERE deleted_at IS NULL
            ORDER BY name, id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        let mut tops_by_category: BTreeMap<CategoryId, BTreeSet<TopCategoryId>> = BTreeMap::new();
        for (top, category) in self.all_links().await? {
            tops_by_category.entry(category).or_default().insert(top);
        }

        rows.into_iter()
            .map(|row| {
                let id: CategoryId = parse_id(&row.id)?;
                row.into_category(tops_by_category.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn list_top_categories(&self) -> RatedResult<Vec<TopCategory>> {
        debug!("Listing top categories");

        let rows = sqlx::query_as::<_, NamedRow>(
            r#"
            SELECT id, name, deleted_at, created_at, updated_at
            FROM top_categories
            WHERE deleted_at IS NULL
            ORDER BY name, id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        let mut members_by_top: BTreeMap<TopCategoryId, BTreeSet<CategoryId>> = BTreeMap::new();
        for (top, category) in self.all_links().await? {
            members_by_top.entry(top).or_default().insert(category);
        }

        rows.into_iter()
            .map(|row| {
                let id: TopCategoryId = parse_id(&row.id)?;
                row.into_top_category(members_by_top.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn insert_category(&self, category: &Category) -> RatedResult<Category> {
        debug!("Inserting category: {}", category.name);

        let mut tx = self.pool.inner().begin().await?;
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, deleted_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(category.id.to_string())
        .bind(&category.name)
        .bind(category.deleted_at)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&mut *tx)
        .await?;
        replace_links_of_category(&mut tx, category).await?;
        commit(tx).await?;

        Ok(category.clone())
    }

    async fn update_category(&self, category: &Category) -> RatedResult<Category> {
        debug!("Updating category: {}", category.id);

        let mut tx = self.pool.inner().begin().await?;
        sqlx::query("UPDATE categories SET name = ?, deleted_at = ?, updated_at = ? WHERE id = ?")
            .bind(&category.name)
            .bind(category.deleted_at)
            .bind(category.updated_at)
            .bind(category.id.to_string())
            .execute(&mut *tx)
            .await?;
        replace_links_of_category(&mut tx, category).await?;
        commit(tx).await?;

        Ok(category.clone())
    }

    async fn insert_top_category(&self, top_category: &TopCategory) -> RatedResult<TopCategory> {
        debug!("Inserting top category: {}", top_category.name);

        let mut tx = self.pool.inner().begin().await?;
        sqlx::query(
            r#"
            INSERT INTO top_categories (id, name, deleted_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(top_category.id.to_string())
        .bind(&top_category.name)
        .bind(top_category.deleted_at)
        .bind(top_category.created_at)
        .bind(top_category.updated_at)
        .execute(&mut *tx)
        .await?;
        replace_links_of_top_category(&mut tx, top_category).await?;
        commit(tx).await?;

        Ok(top_category.clone())
    }

    async fn update_top_category(&self, top_category: &TopCategory) -> RatedResult<TopCategory> {
        debug!("Updating top category: {}", top_category.id);

        let mut tx = self.pool.inner().begin().await?;
        sqlx::query("UPDATE top_categories SET name = ?, deleted_at = ?, updated_at = ? WHERE id = ?")
            .bind(&top_category.name)
            .bind(top_category.deleted_at)
            .bind(top_category.updated_at)
            .bind(top_category.id.to_string())
            .execute(&mut *tx)
            .await?;
        replace_links_of_top_category(&mut tx, top_category).await?;
        commit(tx).await?;

        Ok(top_category.clone())
    }
}
