//! Create a new post

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::{FrontMatter, HeaderFormat, Post};
use crate::Site;

/// Options for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub draft: bool,
    /// Header format; the site default when unset
    pub format: Option<HeaderFormat>,
    /// Explicit file name (without extension) instead of `new_post_name`
    pub path: Option<&'a str>,
}

/// Create a new post file dated `today`. Returns the path written.
pub fn create_post(site: &Site, options: &NewPost<'_>, today: NaiveDate) -> Result<PathBuf> {
    let title = options.title.trim();
    if title.is_empty() {
        anyhow::bail!("Title must not be empty");
    }

    // Generate filename
    let filename = match options.path {
        Some(p) => format!("{}.md", p.trim_end_matches(".md")),
        None => {
            let slug = slug::slugify(title);
            site.config
                .new_post_name
                .replace(":title", &slug)
                .replace(":year", &today.format("%Y").to_string())
                .replace(":month", &today.format("%m").to_string())
                .replace(":day", &today.format("%d").to_string())
        }
    };
    let file_path = site.content_dir.join(&filename);

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let existing = site.load_posts()?;
    let slug = crate::content::ContentLoader::new(site)?.slug_for(&file_path);
    if existing.get(&slug).is_ok() {
        anyhow::bail!("Slug '{}' is already used by another post", slug);
    }

    // Load scaffold template
    let scaffold_path = site.base_dir.join("scaffolds").join("post.md");
    let body = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
            .replace("{{ title }}", title)
            .replace("{{ date }}", &today.format("%Y-%m-%d").to_string())
    } else {
        String::new()
    };

    let format = options.format.unwrap_or(site.config.front_matter);
    let header = FrontMatter::new(title, today, options.draft, format);
    let post = Post::new(slug, header, body);

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, post.to_document()?)?;

    let status = if options.draft { "draft" } else { "published" };
    tracing::info!("Created {} ({})", post.slug(), status);
    Ok(file_path)
}
