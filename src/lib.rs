//! postshelf: load, list and publish front-matter markdown posts
//!
//! A site is a directory with an optional `_config.yml` and a content
//! directory of markdown files, each starting with a YAML, TOML or JSON
//! header. Posts are loaded once into a [`content::PostCollection`] and
//! queried from there.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;

pub use error::{Error, HeaderError, Result};

use std::path::{Path, PathBuf};

use content::{ContentLoader, LoadReport, Post, PostCollection};

/// Name of the configuration file in the site directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site directory and its configuration
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the posts
    pub content_dir: PathBuf,
}

impl Site {
    /// Open a site directory. A missing config file means default settings.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Load every post, failing on the first malformed file
    pub fn load_posts(&self) -> anyhow::Result<PostCollection> {
        Ok(ContentLoader::new(self)?.load()?)
    }

    /// Load what can be loaded and report the rest
    pub fn scan_posts(&self) -> anyhow::Result<LoadReport> {
        Ok(ContentLoader::new(self)?.scan())
    }

    /// Site-relative URL of a post
    pub fn permalink(&self, post: &Post) -> String {
        helpers::permalink(&self.config, post.slug(), &post.publish_date())
    }

    /// Absolute URL of a post
    pub fn full_permalink(&self, post: &Post) -> String {
        let base = self.config.url.trim_end_matches('/');
        format!("{}{}", base, self.permalink(post))
    }
}
