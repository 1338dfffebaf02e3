//! Category taxonomy: categories and the top categories grouping them.

use crate::{CategoryId, Entity, TopCategoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A workplace category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier for the category.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Top categories this category belongs to.
    pub top_category_ids: BTreeSet<TopCategoryId>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new category outside any top category.
    #[must_use]
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name,
            top_category_ids: BTreeSet::new(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the category has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Renames the category.
    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Soft-deletes the category.
    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

impl Entity<CategoryId> for Category {
    fn id(&self) -> &CategoryId {
        &self.id
    }
}

/// A grouping of categories shown as a heading in category listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCategory {
    /// Unique identifier for the top category.
    pub id: TopCategoryId,
    /// Display name.
    pub name: String,
    /// Member categories.
    pub category_ids: BTreeSet<CategoryId>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TopCategory {
    /// Creates a new, empty top category.
    #[must_use]
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: TopCategoryId::new(),
            name,
            category_ids: BTreeSet::new(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the top category has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Renames the top category.
    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Replaces the member set.
    pub fn set_members(&mut self, members: BTreeSet<CategoryId>) {
        self.category_ids = members;
        self.updated_at = Utc::now();
    }

    /// Soft-deletes the top category.
    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

impl Entity<TopCategoryId> for TopCategory {
    fn id(&self) -> &TopCategoryId {
        &self.id
    }
}
