// src/error.rs
use crate::core::html::MarkupError;

/// Everything that can go wrong between the catalog and the written skeleton.
/// Only `Catalog` stops a run; the rest are logged per entity.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{entity}: page structure not recognized ({detail})")]
    Structure { entity: String, detail: String },

    #[error("{entity}: unrecognized kind in title {title:?}")]
    UnrecognizedKind { entity: String, title: String },

    #[error("class catalog unavailable: {0}")]
    Catalog(String),

    #[error("{0}")]
    Usage(String),

    #[error("invalid qualified name: {0:?}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn structure(entity: &str, detail: impl Into<String>) -> Self {
        Error::Structure { entity: s!(entity), detail: detail.into() }
    }

    /// Attach the entity name to a scanner-level failure.
    pub fn from_markup(entity: &str, e: MarkupError) -> Self {
        Error::structure(entity, e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
