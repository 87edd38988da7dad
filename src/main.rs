//! CLI entry point for blog-kit

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_kit::helpers::FeedFilter;
use blog_kit::{BlogConfig, BlogKit, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "blog-kit")]
#[command(version)]
#[command(about = "Inspect markdown blog and documentation content", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Config file (defaults to blog-kit.yml in the base directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content root, overriding the config file
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// Subdirectory of the content root holding entries (defaults to "blog")
    #[arg(long, global = true)]
    subdir: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List entries, newest first
    #[command(alias = "ls")]
    List {
        /// Only entries whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only entries in this category
        #[arg(long)]
        category: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Date format for text output (Moment.js style, e.g. "MMM DD, YYYY")
        #[arg(long, default_value = blog_kit::commands::list::DEFAULT_DATE_FORMAT)]
        date_format: String,
    },

    /// Show a single entry
    Show {
        /// Entry slug (file name without .md)
        slug: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Include the markdown body
        #[arg(long)]
        content: bool,
    },

    /// List categories with entry counts
    Categories {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_kit=debug,info"
    } else {
        "blog_kit=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let kit = load_kit(&base_dir, cli.config, cli.content_dir, cli.subdir)?;
    tracing::debug!("Reading entries from {:?}", kit.blog_dir());

    match cli.command {
        Commands::List {
            search,
            category,
            json,
            date_format,
        } => {
            let filter = FeedFilter { search, category };
            blog_kit::commands::list::run(&kit, &filter, json, &date_format)?;
        }

        Commands::Show {
            slug,
            json,
            content,
        } => {
            blog_kit::commands::show::run(&kit, &slug, json, content)?;
        }

        Commands::Categories { json } => {
            blog_kit::commands::list::categories(&kit, json)?;
        }

        Commands::Version => {
            println!("blog-kit version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Config file first, then command-line overrides
fn load_kit(
    base_dir: &Path,
    config_path: Option<PathBuf>,
    content_dir: Option<PathBuf>,
    subdir: Option<String>,
) -> Result<BlogKit> {
    let mut config = match config_path {
        Some(path) => {
            let path = if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            };
            BlogConfig::load(&path)?
        }
        None => {
            let default_path = base_dir.join(CONFIG_FILE);
            if default_path.exists() {
                BlogConfig::load(&default_path)?
            } else {
                BlogConfig::default()
            }
        }
    };

    if let Some(dir) = content_dir {
        config.content_directory = dir;
    }
    if let Some(subdir) = subdir {
        config.blog_subdirectory = Some(subdir);
    }

    Ok(BlogKit::with_config(base_dir, config))
}
