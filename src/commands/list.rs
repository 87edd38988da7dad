//! List site content

use anyhow::Result;

use crate::content::BlogMeta;
use crate::helpers::{count_categories, filter_blogs, format_date, FeedFilter};
use crate::BlogKit;

/// Moment.js-style format used for dates in text output
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Print the feed, narrowed by `filter`
pub fn run(kit: &BlogKit, filter: &FeedFilter, json: bool, date_format: &str) -> Result<()> {
    let metas = filter_blogs(&kit.list(), filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&metas)?);
        return Ok(());
    }

    println!("Entries ({}):", metas.len());
    for meta in &metas {
        println!("  {}", entry_line(meta, date_format));
    }

    Ok(())
}

/// One text line of the feed; dates that do not parse are shown as written
pub fn entry_line(meta: &BlogMeta, date_format: &str) -> String {
    let date = meta
        .parsed_date()
        .map_or_else(|| meta.date.clone(), |d| format_date(&d, date_format));
    format!(
        "{} - {} [{}] ({})",
        date, meta.title, meta.slug, meta.reading_time
    )
}

/// Print every category with its entry count
pub fn categories(kit: &BlogKit, json: bool) -> Result<()> {
    let categories = count_categories(&kit.list());

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    println!("Categories ({}):", categories.len());
    let mut categories: Vec<_> = categories.into_iter().collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1));
    for (cat, count) in categories {
        println!("  {} ({})", cat, count);
    }

    Ok(())
}
