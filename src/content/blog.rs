//! Blog entry models

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::cmp::Reverse;

use super::error::FrontMatterError;
use super::frontmatter::{scalar_to_string, string_or_vec, FrontMatter};
use super::reading_time::ReadingTime;
use crate::helpers::parse_date;

/// Front-matter keys mapped onto typed fields or always recomputed
const RESERVED_KEYS: [&str; 7] = [
    "slug",
    "title",
    "description",
    "date",
    "categories",
    "category",
    "readingTime",
];

/// Discoverable attributes of one entry, without its body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogMeta {
    /// Identifier derived from the file name
    pub slug: String,

    pub title: String,

    pub description: String,

    /// Date as written in the front-matter; only used for ordering
    pub date: String,

    /// Classification; a singular `category` is folded in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// Always computed from the body
    pub reading_time: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl BlogMeta {
    /// Build the record for `slug` from parsed front-matter.
    ///
    /// The slug argument wins over a `slug` attribute, and `readingTime` is
    /// never taken from the input. Missing string fields become empty; see
    /// [`BlogMeta::missing_fields`].
    pub fn from_front_matter(
        slug: &str,
        front_matter: FrontMatter,
        reading_time: &ReadingTime,
    ) -> Result<Self, FrontMatterError> {
        let mut attributes = front_matter.attributes;

        let title = take_string(&mut attributes, "title");
        let description = take_string(&mut attributes, "description");
        let date = take_string(&mut attributes, "date");

        let mut categories = match attributes.shift_remove("categories") {
            Some(value) => string_or_vec(value)?,
            None => Vec::new(),
        };
        if let Some(value) = attributes.shift_remove("category") {
            for category in string_or_vec(value)? {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }

        attributes.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));

        Ok(Self {
            slug: slug.to_string(),
            title,
            description,
            date,
            categories,
            reading_time: reading_time.text.clone(),
            extra: attributes,
        })
    }

    /// Required fields that were absent or empty in the front-matter
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push("title");
        }
        if self.description.is_empty() {
            missing.push("description");
        }
        if self.date.is_empty() {
            missing.push("date");
        }
        missing
    }

    /// Calendar date used for ordering, if the `date` field parses
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// A full entry: metadata plus the markdown body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub metadata: BlogMeta,
    /// Markdown with the front-matter stripped
    pub content: String,
}

/// Sort newest first. Entries whose date does not parse go last; ties keep
/// their current order.
pub fn sort_by_date(metas: &mut [BlogMeta]) {
    metas.sort_by_cached_key(|meta| Reverse(meta.parsed_date()));
}

fn take_string(attributes: &mut IndexMap<String, Value>, key: &str) -> String {
    attributes
        .shift_remove(key)
        .and_then(|value| scalar_to_string(&value))
        .unwrap_or_default()
}
