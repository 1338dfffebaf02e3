//! Query string extractors.

use rated_core::PageRequest;
use serde::Deserialize;

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::new(
            query.page.unwrap_or(0),
            query.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

/// Query parameters for workplace search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
}

impl SearchQuery {
    /// The search text, empty when absent.
    pub fn text(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }

    /// The requested page.
    pub fn page_request(&self) -> PageRequest {
        PaginationQuery {
            page: self.page,
            size: self.size,
        }
        .into()
    }
}
