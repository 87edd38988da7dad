//! Content location configuration (blog-kit.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory scanned when none is configured
pub const DEFAULT_BLOG_SUBDIRECTORY: &str = "blog";

/// Where entries live on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Root of all content
    pub content_directory: PathBuf,
    /// Directory under the root holding the `.md` files (defaults to `blog`)
    pub blog_subdirectory: Option<String>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            content_directory: PathBuf::from("content"),
            blog_subdirectory: None,
        }
    }
}

impl BlogConfig {
    /// Create a configuration for `content_directory` with the default subdirectory
    pub fn new<P: Into<PathBuf>>(content_directory: P) -> Self {
        Self {
            content_directory: content_directory.into(),
            blog_subdirectory: None,
        }
    }

    /// Use a different subdirectory, e.g. `docs`
    pub fn with_subdirectory<S: Into<String>>(mut self, subdirectory: S) -> Self {
        self.blog_subdirectory = Some(subdirectory.into());
        self
    }

    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: BlogConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// The configured subdirectory name, falling back to `blog`
    pub fn subdirectory(&self) -> &str {
        self.blog_subdirectory
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BLOG_SUBDIRECTORY)
    }

    /// Directory scanned for entries. Existence is not checked here.
    pub fn blog_directory(&self) -> PathBuf {
        self.content_directory.join(self.subdirectory())
    }

    /// Resolve a relative content directory against `base_dir`
    pub fn rebase<P: AsRef<Path>>(mut self, base_dir: P) -> Self {
        if self.content_directory.is_relative() {
            self.content_directory = base_dir.as_ref().join(&self.content_directory);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.content_directory, PathBuf::from("content"));
        assert_eq!(config.subdirectory(), "blog");
        assert_eq!(config.blog_directory(), PathBuf::from("content").join("blog"));
    }

    #[test]
    fn test_custom_subdirectory() {
        let config = BlogConfig::new("./content").with_subdirectory("docs");
        assert_eq!(config.blog_directory(), PathBuf::from("./content").join("docs"));
    }

    #[test]
    fn test_empty_subdirectory_falls_back() {
        let config = BlogConfig::new("site").with_subdirectory("");
        assert_eq!(config.blog_directory(), PathBuf::from("site").join("blog"));
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
content_directory: ./site/content
blog_subdirectory: docs
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.content_directory, PathBuf::from("./site/content"));
        assert_eq!(config.blog_subdirectory.as_deref(), Some("docs"));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: BlogConfig = serde_yaml::from_str("blog_subdirectory: notes\n").unwrap();
        assert_eq!(config.content_directory, PathBuf::from("content"));
        assert_eq!(config.subdirectory(), "notes");
    }

    #[test]
    fn test_rebase_relative_only() {
        let config = BlogConfig::new("content").rebase("/srv/site");
        assert_eq!(config.content_directory, PathBuf::from("/srv/site/content"));

        let absolute = BlogConfig::new("/data/content").rebase("/srv/site");
        assert_eq!(absolute.content_directory, PathBuf::from("/data/content"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog-kit.yml");
        fs::write(&path, "content_directory: posts\n").unwrap();

        let config = BlogConfig::load(&path).unwrap();
        assert_eq!(config.content_directory, PathBuf::from("posts"));
        assert!(BlogConfig::load(dir.path().join("missing.yml")).is_err());
    }
}
