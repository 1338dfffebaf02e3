//! Workplace entity.

use super::category::Category;
use crate::{Entity, WorkplaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workplace students can review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workplace {
    /// Unique identifier for the workplace.
    pub id: WorkplaceId,
    /// Unique display name.
    pub name: String,
    /// VAT registration number.
    pub vat: Option<String>,
    /// Public website.
    pub website: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Categories the workplace is listed under.
    pub categories: Vec<Category>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Workplace {
    /// Creates a new workplace without categories.
    #[must_use]
    pub fn new(name: String, vat: Option<String>, website: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: WorkplaceId::new(),
            name,
            vat,
            website,
            address: None,
            categories: Vec::new(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the workplace has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if `query` occurs in the name, VAT number or website (case-insensitive).
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        std::iter::once(Some(&self.name))
            .chain([self.vat.as_ref(), self.website.as_ref()])
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Entity<WorkplaceId> for Workplace {
    fn id(&self) -> &WorkplaceId {
        &self.id
    }
}
