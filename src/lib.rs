//! blog-kit: markdown blog and documentation content as typed metadata
//!
//! This crate discovers markdown files with front-matter in a content
//! directory, derives slugs and reading times, and hands back a feed sorted
//! newest first or a single entry by slug. Rendering is left to the caller.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

pub use config::BlogConfig;
pub use content::{
    extract_blog, extract_blog_meta, get_all_blogs_meta, get_blog, get_blog_content, Blog,
    BlogMeta, ContentError,
};

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Config file looked up in the base directory
pub const CONFIG_FILE: &str = "blog-kit.yml";

/// A content site rooted at a base directory
#[derive(Clone)]
pub struct BlogKit {
    /// Content configuration
    pub config: BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
}

impl BlogKit {
    /// Create a new instance from a directory, reading `blog-kit.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            BlogConfig::load(&config_path)?
        } else {
            BlogConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration; relative content
    /// directories resolve against `base_dir`
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: BlogConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config.rebase(&base_dir);
        Self { config, base_dir }
    }

    /// Directory scanned for entries
    pub fn blog_dir(&self) -> PathBuf {
        self.config.blog_directory()
    }

    /// The feed, newest first
    pub fn list(&self) -> Vec<BlogMeta> {
        get_all_blogs_meta(&self.config)
    }

    /// One entry by slug
    pub fn get(&self, slug: &str) -> Result<Option<Blog>, ContentError> {
        get_blog(slug, &self.config)
    }
}
