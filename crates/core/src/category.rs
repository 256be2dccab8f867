//! Product categories and the paginated category search.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Default page size for category search.
pub const DEFAULT_CATEGORY_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Query parameters for `GET /categories/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySearch {
    pub search_string: String,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

impl CategorySearch {
    pub fn new(search_string: impl Into<String>) -> Self {
        Self {
            search_string: search_string.into(),
            ..Self::default()
        }
    }

    /// The same search one page further.
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }
}

impl Default for CategorySearch {
    fn default() -> Self {
        Self {
            search_string: String::new(),
            page: 1,
            page_size: DEFAULT_CATEGORY_PAGE_SIZE,
        }
    }
}

/// One page of category search results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryPage {
    #[serde(default)]
    pub items: Vec<Category>,
    #[serde(default)]
    pub last: Option<bool>,
}

impl CategoryPage {
    /// Whether this is the final page.
    ///
    /// Uses the backend's `last` flag when present, otherwise treats a short
    /// page as the end.
    pub fn is_last(&self, page_size: u32) -> bool {
        self.last
            .unwrap_or(self.items.len() < page_size as usize)
    }
}
