//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# postshelf configuration

# Site
title: Posts
author: ''

# URL
url: http://example.com
root: /
permalink: posts/:slug/

# Directory
content_dir: content/posts
skip: []

# Writing
new_post_name: :title.md
front_matter: yaml
strip_date_prefix: true

# Display
date_format: '%Y-%m-%d'
words_per_minute: 200
"#;

const DEFAULT_SCAFFOLD: &str = "Write the introduction here.\n\n<!-- more -->\n";

/// Initialize a new site in the given directory. Existing files are left alone.
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    write_if_missing(&target_dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;
    write_if_missing(&target_dir.join("scaffolds/post.md"), DEFAULT_SCAFFOLD)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
