//! Show a single entry

use anyhow::Result;

use crate::helpers::full_date;
use crate::BlogKit;

/// Print one entry's metadata, and its body when `with_content` is set
pub fn run(kit: &BlogKit, slug: &str, json: bool, with_content: bool) -> Result<()> {
    let Some(blog) = kit.get(slug)? else {
        anyhow::bail!("No entry found for slug: {}", slug);
    };

    if json {
        let output = if with_content {
            serde_json::to_string_pretty(&blog)?
        } else {
            serde_json::to_string_pretty(&blog.metadata)?
        };
        println!("{}", output);
        return Ok(());
    }

    let meta = &blog.metadata;
    println!("{}", meta.title);
    if !meta.description.is_empty() {
        println!("{}", meta.description);
    }
    let date = meta
        .parsed_date()
        .map_or_else(|| meta.date.clone(), |d| full_date(&d));
    println!("{} · {}", date, meta.reading_time);
    if !meta.categories.is_empty() {
        println!("Categories: {}", meta.categories.join(", "));
    }

    if with_content {
        println!();
        println!("{}", blog.content);
    }

    Ok(())
}
