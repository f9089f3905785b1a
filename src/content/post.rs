//! Post model

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use super::{markdown, FrontMatter};
use crate::error::{Error, HeaderError, Result};

/// A blog post
///
/// The publish date and slug never change after construction. The only
/// mutations are [`Post::publish`], which clears the draft flag once, and
/// [`Post::set_body`].
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique identifier, derived from the filename
    slug: String,

    /// Parsed metadata header
    header: FrontMatter,

    /// Raw markdown content after the header
    body: String,

    /// Source file path (relative to the site directory)
    source: String,

    /// Full source file path
    full_source: PathBuf,
}

impl Post {
    /// Create a post from its parts
    pub fn new(slug: impl Into<String>, header: FrontMatter, body: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            source: slug.clone(),
            full_source: PathBuf::from(&slug),
            slug,
            header,
            body: body.into(),
        }
    }

    /// Record where the post was loaded from
    pub fn with_source(mut self, source: impl Into<String>, full_source: &Path) -> Self {
        self.source = source.into();
        self.full_source = full_source.to_path_buf();
        self
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub fn publish_date(&self) -> NaiveDate {
        self.header.date()
    }

    pub fn is_draft(&self) -> bool {
        self.header.draft
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn full_source(&self) -> &Path {
        &self.full_source
    }

    /// The full metadata header, including fields this crate does not interpret
    pub fn front_matter(&self) -> &FrontMatter {
        &self.header
    }

    /// Turn a draft into a published post
    pub fn publish(&mut self) -> Result<()> {
        if !self.header.draft {
            return Err(Error::AlreadyPublished(self.slug.clone()));
        }
        self.header.draft = false;
        tracing::debug!("Published {}", self.slug);
        Ok(())
    }

    /// Replace the markdown body
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Markdown before `<!-- more -->`, if present
    pub fn excerpt(&self) -> Option<&str> {
        markdown::split_excerpt(&self.body)
    }

    /// Plain-text summary of at most `max_chars` characters (plus an ellipsis)
    pub fn summary(&self, max_chars: usize) -> String {
        markdown::summary(&self.body, max_chars)
    }

    pub fn word_count(&self) -> usize {
        markdown::word_count(&self.body)
    }

    /// Estimated reading time in whole minutes, never less than one
    pub fn reading_minutes(&self, words_per_minute: usize) -> usize {
        let wpm = words_per_minute.max(1);
        self.word_count().div_ceil(wpm).max(1)
    }

    /// The full file contents: header, blank line, body
    pub fn to_document(&self) -> std::result::Result<String, HeaderError> {
        let header = self.header.to_header()?;
        Ok(format!("{}\n{}", header, self.body))
    }
}
