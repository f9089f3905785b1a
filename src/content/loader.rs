//! Content loader - loads posts from the content directory

use anyhow::Context;
use glob::Pattern;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post, PostCollection};
use crate::error::{Error, Result};
use crate::Site;

lazy_static! {
    /// `2024-05-21-ownership` style filenames
    static ref DATE_PREFIX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}-(.+)$").unwrap();
}

/// A file that could not be turned into a post
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Result of a lenient scan: everything that loaded, and everything that didn't
#[derive(Debug, Default)]
pub struct LoadReport {
    pub collection: PostCollection,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    skip: Vec<Pattern>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader. Fails if a `skip` pattern is not a valid glob.
    pub fn new(site: &'a Site) -> anyhow::Result<Self> {
        let skip = site
            .config
            .skip
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid skip pattern: {}", p)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { site, skip })
    }

    /// Load every post, stopping at the first file that fails
    pub fn load(&self) -> Result<PostCollection> {
        let (files, walk_failures) = self.markdown_files();
        if let Some(failure) = walk_failures.into_iter().next() {
            return Err(failure.error);
        }

        let mut collection = PostCollection::new();
        for path in files {
            collection.insert(self.load_post(&path)?)?;
        }
        tracing::debug!("Loaded {} posts", collection.len());
        Ok(collection)
    }

    /// Load every post that can be loaded, collecting the rest as failures
    pub fn scan(&self) -> LoadReport {
        let (files, walk_failures) = self.markdown_files();
        let mut report = LoadReport {
            failures: walk_failures,
            ..Default::default()
        };

        for path in files {
            let result = self
                .load_post(&path)
                .and_then(|post| report.collection.insert(post));
            if let Err(error) = result {
                tracing::warn!("Failed to load post {:?}: {}", path, error);
                report.failures.push(LoadFailure { path, error });
            }
        }

        report
    }

    /// Markdown files under the content directory sorted by path, plus
    /// entries the walk could not read
    fn markdown_files(&self) -> (Vec<PathBuf>, Vec<LoadFailure>) {
        let content_dir = &self.site.content_dir;
        let mut files = Vec::new();
        let mut failures = Vec::new();

        if !content_dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", content_dir);
            return (files, failures);
        }

        for entry in WalkDir::new(content_dir).follow_links(true) {
            match entry {
                Ok(entry) => {
                    let path = entry.into_path();
                    if path.is_file() && is_markdown_file(&path) && !self.is_skipped(&path) {
                        files.push(path);
                    }
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| content_dir.clone());
                    tracing::warn!("Cannot read {:?}: {}", path, err);
                    failures.push(LoadFailure {
                        path,
                        error: Error::Io(err.into()),
                    });
                }
            }
        }

        files.sort();
        (files, failures)
    }

    fn is_skipped(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.site.content_dir).unwrap_or(path);
        let skipped = self.skip.iter().any(|p| p.matches_path(relative));
        if skipped {
            tracing::debug!("Skipping {:?}", relative);
        }
        skipped
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;

        // Calculate source path relative to the site directory
        let source = path
            .strip_prefix(&self.site.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let (header, body) = FrontMatter::parse(&content).map_err(|e| e.at(source.clone()))?;
        let slug = self.slug_for(path);

        Ok(Post::new(slug, header, body).with_source(source, path))
    }

    /// Derive the slug from a post's filename
    pub fn slug_for(&self, path: &Path) -> String {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");

        // Page bundles: content/posts/ownership/index.md
        let name = if stem == "index" || stem == "_index" {
            path.parent()
                .filter(|dir| *dir != self.site.content_dir.as_path())
                .and_then(|dir| dir.file_name())
                .and_then(|s| s.to_str())
                .unwrap_or(stem)
        } else {
            stem
        };

        if self.site.config.strip_date_prefix {
            if let Some(caps) = DATE_PREFIX.captures(name) {
                return caps[1].to_string();
            }
        }

        name.to_string()
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}
