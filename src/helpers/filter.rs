//! Feed filtering by search term and category

use indexmap::IndexMap;

use crate::content::BlogMeta;

/// Narrowing applied to a feed; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    /// Case-insensitive substring of the title or description
    pub search: Option<String>,
    /// Exact category name
    pub category: Option<String>,
}

impl FeedFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search<S: Into<String>>(mut self, term: S) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether `meta` passes both criteria
    pub fn matches(&self, meta: &BlogMeta) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let hit = meta.title.to_lowercase().contains(&term)
                || meta.description.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if !meta.has_category(category) {
                return false;
            }
        }

        true
    }
}

/// Entries passing `filter`, in feed order
pub fn filter_blogs(metas: &[BlogMeta], filter: &FeedFilter) -> Vec<BlogMeta> {
    metas
        .iter()
        .filter(|meta| filter.matches(meta))
        .cloned()
        .collect()
}

/// Unique categories in order of first appearance
pub fn collect_categories(metas: &[BlogMeta]) -> Vec<String> {
    count_categories(metas).into_keys().collect()
}

/// Number of entries per category, in order of first appearance
pub fn count_categories(metas: &[BlogMeta]) -> IndexMap<String, usize> {
    let mut categories: IndexMap<String, usize> = IndexMap::new();

    for meta in metas {
        for cat in &meta.categories {
            *categories.entry(cat.clone()).or_insert(0) += 1;
        }
    }

    categories
}
