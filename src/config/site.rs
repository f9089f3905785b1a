//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::HeaderFormat;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,
    pub permalink: String,

    // Directory
    pub content_dir: String,
    /// Glob patterns, relative to `content_dir`, that are never loaded
    #[serde(default)]
    pub skip: Vec<String>,

    // Writing
    pub new_post_name: String,
    pub front_matter: HeaderFormat,
    pub strip_date_prefix: bool,

    // Display
    pub date_format: String,
    pub words_per_minute: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Posts".to_string(),
            author: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            permalink: "posts/:slug/".to_string(),

            content_dir: "content/posts".to_string(),
            skip: Vec::new(),

            new_post_name: ":title.md".to_string(),
            front_matter: HeaderFormat::Yaml,
            strip_date_prefix: true,

            date_format: "%Y-%m-%d".to_string(),
            words_per_minute: 200,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if config.words_per_minute == 0 {
            anyhow::bail!("words_per_minute must be greater than zero");
        }
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}
