//! Configuration module

mod blog;

pub use blog::BlogConfig;
pub use blog::DEFAULT_BLOG_SUBDIRECTORY;
