//! Error types for loading and querying posts

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the content model
#[derive(Debug, Error)]
pub enum Error {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Malformed header in {path}: {source}")]
    MalformedHeader {
        path: String,
        #[source]
        source: HeaderError,
    },

    #[error("Duplicate slug '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("Post already published: {0}")]
    AlreadyPublished(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a metadata header could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("no metadata header found")]
    Missing,

    #[error("header block is not terminated by '{0}'")]
    Unterminated(&'static str),

    #[error("{0}")]
    Syntax(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl HeaderError {
    /// Attach the offending file path
    pub fn at(self, path: impl Into<String>) -> Error {
        Error::MalformedHeader {
            path: path.into(),
            source: self,
        }
    }
}
