//! MySQL workplace repository implementation.

use super::{contains_pattern, limit_offset, parse_id};
use crate::{traits::WorkplaceRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rated_core::{
    Category, CategoryId, Page, PageRequest, RatedError, RatedResult, Workplace, WorkplaceId,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL workplace repository implementation.
#[derive(Clone)]
pub struct MySqlWorkplaceRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlWorkplaceRepository {
    /// Creates a new MySQL workplace repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    /// Loads the non-deleted categories of a workplace with their memberships.
    async fn categories_of(&self, workplace_id: WorkplaceId) -> RatedResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryLinkRow>(
            r#"
            SELECT c.id, c.name, c.deleted_at, c.created_at, c.updated_at,
                   tcc.top_category_id
            FROM workplace_categories wc
            JOIN categories c ON c.id = wc.category_id
            LEFT JOIN top_category_categories tcc ON tcc.category_id = c.id
            WHERE wc.workplace_id = ? AND c.deleted_at IS NULL
            ORDER BY c.name, c.id
            "#,
        )
        .bind(workplace_id.to_string())
        .fetch_all(self.pool.inner())
        .await?;

        fold_categories(rows)
    }
}

/// Database row representation of a workplace.
#[derive(Debug, FromRow)]
struct WorkplaceRow {
    id: String,
    name: String,
    vat: Option<String>,
    website: Option<String>,
    address: Option<String>,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WorkplaceRow {
    fn into_workplace(self, categories: Vec<Category>) -> RatedResult<Workplace> {
        Ok(Workplace {
            id: parse_id(&self.id)?,
            name: self.name,
            vat: self.vat,
            website: self.website,
            address: self.address,
            categories,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A category joined with one of its top category links.
#[derive(Debug, FromRow)]
struct CategoryLinkRow {
    id: String,
    name: String,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    top_category_id: Option<String>,
}

/// Collapses consecutive rows of the same category into one entity.
fn fold_categories(rows: Vec<CategoryLinkRow>) -> RatedResult<Vec<Category>> {
    let mut categories: Vec<Category> = Vec::new();
    for row in rows {
        let id: CategoryId = parse_id(&row.id)?;
        let top = row.top_category_id.as_deref().map(parse_id).transpose()?;

        match categories.last_mut() {
            Some(last) if last.id == id => {
                last.top_category_ids.extend(top);
            }
            _ => categories.push(Category {
                id,
                name: row.name,
                top_category_ids: top.into_iter().collect(),
                deleted_at: row.deleted_at,
                created_at: row.created_at,
                updated_at: row.updated_at,
            }),
        }
    }
    Ok(categories)
}

#[async_trait]
impl WorkplaceRepository for MySqlWorkplaceRepository {
    async fn find_by_id(&self, id: WorkplaceId) -> RatedResult<Option<Workplace>> {
        debug!("Finding workplace by id: {}", id);

        let row = sqlx::query_as::<_, WorkplaceRow>(
            r#"
            SELECT id, name, vat, website, address, deleted_at, created_at, updated_at
            FROM workplaces
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        match row {
            Some(row) => {
                let categories = self.categories_of(id).await?;
                row.into_workplace(categories).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn search(&self, query: &str, page: PageRequest) -> RatedResult<Page<Workplace>> {
        debug!("Searching workplaces for '{}', page: {}", query, page.page);

        let pattern = contains_pattern(query.trim());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM workplaces
            WHERE deleted_at IS NULL
              AND (name LIKE ? OR vat LIKE ? OR website LIKE ?)
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_one(self.pool.inner())
        .await?;

        let (limit, offset) = limit_offset(page);
        let rows = sqlx::query_as::<_, WorkplaceRow>(
            r#"
            SELECT id, name, vat, website, address, deleted_at, created_at, updated_at
            FROM workplaces
            WHERE deleted_at IS NULL
              AND (name LIKE ? OR vat LIKE ? OR website LIKE ?)
            ORDER BY name, id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.inner())
        .await?;

        let mut workplaces = Vec::with_capacity(rows.len());
        for row in rows {
            let id: WorkplaceId = parse_id(&row.id)?;
            let categories = self.categories_of(id).await?;
            workplaces.push(row.into_workplace(categories)?);
        }

        Ok(Page::new(workplaces, page, total.unsigned_abs()))
    }

    async fn insert(&self, workplace: &Workplace) -> RatedResult<Workplace> {
        debug!("Inserting workplace: {}", workplace.name);

        let mut tx = self.pool.inner().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO workplaces (id, name, vat, website, address, deleted_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(workplace.id.to_string())
        .bind(&workplace.name)
        .bind(&workplace.vat)
        .bind(&workplace.website)
        .bind(&workplace.address)
        .bind(workplace.deleted_at)
        .bind(workplace.created_at)
        .bind(workplace.updated_at)
        .execute(&mut *tx)
        .await?;

        for category in &workplace.categories {
            sqlx::query("INSERT INTO workplace_categories (workplace_id, category_id) VALUES (?, ?)")
                .bind(workplace.id.to_string())
                .bind(category.id.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| RatedError::Database(format!("Failed to commit workplace: {e}")))?;

        Ok(workplace.clone())
    }
}
