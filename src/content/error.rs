//! Errors raised while loading content

use std::path::PathBuf;
use thiserror::Error;

/// Failure to split or decode a front-matter block
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,
}

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Malformed content for {slug:?}: {source}")]
    Malformed {
        slug: String,
        #[source]
        source: FrontMatterError,
    },

    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub(crate) fn malformed(slug: &str, source: FrontMatterError) -> Self {
        ContentError::Malformed {
            slug: slug.to_string(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContentError::Io {
            path: path.into(),
            source,
        }
    }
}
