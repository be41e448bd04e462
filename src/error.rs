//! Error types for episcope

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EpiError>;

#[derive(Error, Debug)]
pub enum EpiError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error("dataset {}: {message}", path.display())]
    Dataset { path: PathBuf, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid sort key {0:?} (expected new|title|journal)")]
    InvalidSortKey(String),
}

impl EpiError {
    /// Stable machine-readable code for robot output
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Config(_) | Self::MissingConfig(_) => "config",
            Self::Dataset { .. } => "dataset",
            Self::NotFound(_) => "not_found",
            Self::InvalidSortKey(_) => "invalid_sort_key",
        }
    }
}
