//! Content module - front-matter, reading time, and entry loading

mod blog;
mod error;
mod frontmatter;
pub mod loader;
mod reading_time;

pub use blog::{sort_by_date, Blog, BlogMeta};
pub use error::{ContentError, FrontMatterError};
pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use reading_time::{count_words, ReadingTime, ReadingTimeEstimator};

use crate::config::BlogConfig;

/// All entries' metadata in `config`'s blog directory, newest first
pub fn get_all_blogs_meta(config: &BlogConfig) -> Vec<BlogMeta> {
    ContentLoader::new(config).load_all_meta()
}

/// One entry by slug; `Ok(None)` when it does not exist
pub fn get_blog(slug: &str, config: &BlogConfig) -> Result<Option<Blog>, ContentError> {
    ContentLoader::new(config).load_blog(slug)
}

/// Body of one entry, or an empty string
pub fn get_blog_content(slug: &str, config: &BlogConfig) -> String {
    ContentLoader::new(config).load_content(slug)
}

/// Build an entry from markdown that is already in memory
pub fn extract_blog(raw: &str, slug: &str) -> Result<Blog, ContentError> {
    loader::extract_with(&ReadingTimeEstimator::default(), raw, slug)
}

/// Metadata only variant of [`extract_blog`]
pub fn extract_blog_meta(raw: &str, slug: &str) -> Result<BlogMeta, ContentError> {
    extract_blog(raw, slug).map(|blog| blog.metadata)
}
