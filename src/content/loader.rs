//! Content loader - loads blog entries from the configured directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::blog::sort_by_date;
use super::error::ContentError;
use super::{Blog, BlogMeta, FrontMatter, ReadingTimeEstimator};
use crate::config::BlogConfig;

/// Extension that marks a file as an entry
const MARKDOWN_EXTENSION: &str = ".md";

/// Loads entries from `<content_directory>/<blog_subdirectory>`
pub struct ContentLoader<'a> {
    config: &'a BlogConfig,
    estimator: ReadingTimeEstimator,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(config: &'a BlogConfig) -> Self {
        Self {
            config,
            estimator: ReadingTimeEstimator::default(),
        }
    }

    /// Use a different reading speed
    pub fn with_estimator(mut self, estimator: ReadingTimeEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Load the metadata of every entry, newest first.
    ///
    /// A missing directory yields an empty feed. Entries that cannot be read
    /// or parsed are logged and skipped.
    pub fn load_all_meta(&self) -> Vec<BlogMeta> {
        let blog_dir = self.config.blog_directory();
        if !blog_dir.is_dir() {
            tracing::warn!("Blog directory not found: {:?}", blog_dir);
            return Vec::new();
        }

        let mut metas = Vec::new();

        for (slug, path) in list_entry_files(&blog_dir) {
            match self.load_file(&slug, &path) {
                Ok(blog) => {
                    tracing::debug!("Loaded {:?} from {:?}", slug, path);
                    metas.push(blog.metadata);
                }
                Err(e) => {
                    tracing::warn!("Skipping entry {:?}: {}", path, e);
                }
            }
        }

        sort_by_date(&mut metas);

        metas
    }

    /// Load one entry by slug. `Ok(None)` when no `<slug>.md` exists.
    pub fn load_blog(&self, slug: &str) -> Result<Option<Blog>, ContentError> {
        validate_slug(slug)?;

        let path = self.entry_path(slug);
        if !path.exists() {
            return Ok(None);
        }

        match self.load_file(slug, &path) {
            Ok(blog) => Ok(Some(blog)),
            Err(ContentError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Body of one entry; empty when it is missing or fails to load
    pub fn load_content(&self, slug: &str) -> String {
        match self.load_blog(slug) {
            Ok(Some(blog)) => blog.content,
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!("Error reading entry {:?}: {}", slug, e);
                String::new()
            }
        }
    }

    /// Build an entry from markdown already in memory
    pub fn extract(&self, raw: &str, slug: &str) -> Result<Blog, ContentError> {
        extract_with(&self.estimator, raw, slug)
    }

    /// Path an entry with `slug` would be read from
    pub fn entry_path(&self, slug: &str) -> PathBuf {
        self.config
            .blog_directory()
            .join(format!("{}{}", slug, MARKDOWN_EXTENSION))
    }

    fn load_file(&self, slug: &str, path: &Path) -> Result<Blog, ContentError> {
        let raw = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        self.extract(&raw, slug)
    }
}

/// Build an entry from in-memory markdown, timing the body with `estimator`
pub fn extract_with(
    estimator: &ReadingTimeEstimator,
    raw: &str,
    slug: &str,
) -> Result<Blog, ContentError> {
    let (front_matter, body) =
        FrontMatter::parse(raw).map_err(|e| ContentError::malformed(slug, e))?;
    let reading_time = estimator.estimate(body);

    let metadata = BlogMeta::from_front_matter(slug, front_matter, &reading_time)
        .map_err(|e| ContentError::malformed(slug, e))?;

    let missing = metadata.missing_fields();
    if !missing.is_empty() {
        tracing::warn!("Entry {:?} is missing fields: {}", slug, missing.join(", "));
    }

    Ok(Blog {
        metadata,
        content: body.to_string(),
    })
}

/// `(slug, path)` for every `.md` file directly inside `dir`, by file name
fn list_entry_files(dir: &Path) -> Vec<(String, PathBuf)> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to read entry in {:?}: {}", dir, e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!("Skipping non UTF-8 file name {:?}", entry.path());
            continue;
        };

        match slug_from_file_name(name) {
            Some(slug) => files.push((slug.to_string(), entry.path().to_path_buf())),
            None => tracing::debug!("Ignoring non-markdown file {:?}", entry.path()),
        }
    }

    files
}

/// File name minus `.md`; `None` for other files
pub fn slug_from_file_name(name: &str) -> Option<&str> {
    name.strip_suffix(MARKDOWN_EXTENSION)
        .filter(|slug| !slug.is_empty())
}

/// Reject slugs that could name a file outside the blog directory
fn validate_slug(slug: &str) -> Result<(), ContentError> {
    let invalid = slug.is_empty()
        || slug.contains(['/', '\\', '\0'])
        || slug == "."
        || slug == "..";
    if invalid {
        return Err(ContentError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_file_name() {
        assert_eq!(slug_from_file_name("hello-world.md"), Some("hello-world"));
        assert_eq!(slug_from_file_name("v1.2.md"), Some("v1.2"));
        assert_eq!(slug_from_file_name("notes.markdown"), None);
        assert_eq!(slug_from_file_name("README.MD"), None);
        assert_eq!(slug_from_file_name(".md"), None);
        assert_eq!(slug_from_file_name("image.png"), None);
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("hello").is_ok());
        assert!(validate_slug("v1.2").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("..").is_err());
        assert!(validate_slug("../secret").is_err());
        assert!(validate_slug("a\\b").is_err());
    }

    #[test]
    fn test_entry_path() {
        let config = BlogConfig::new("/site/content").with_subdirectory("docs");
        let loader = ContentLoader::new(&config);
        assert_eq!(
            loader.entry_path("intro"),
            PathBuf::from("/site/content/docs/intro.md")
        );
    }

    #[test]
    fn test_extract_with_custom_speed() {
        let config = BlogConfig::default();
        let loader =
            ContentLoader::new(&config).with_estimator(ReadingTimeEstimator::new(2.0));
        let blog = loader
            .extract("---\ntitle: T\n---\none two three four five", "t")
            .unwrap();
        assert_eq!(blog.metadata.reading_time, "3 min read");
        assert_eq!(blog.content, "one two three four five");
    }

    #[test]
    fn test_extract_with_needs_no_config() {
        let estimator = ReadingTimeEstimator::new(2.0);
        let blog = extract_with(&estimator, "---\ntitle: T\n---\none two three four five", "t")
            .unwrap();
        assert_eq!(blog.metadata.slug, "t");
        assert_eq!(blog.metadata.reading_time, "3 min read");

        let err = extract_with(&estimator, "---\n- a\n---\n", "bad").unwrap_err();
        assert!(matches!(err, ContentError::Malformed { .. }));
    }
}
