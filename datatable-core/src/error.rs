//! Error types
//!
//! The pipeline itself degrades instead of failing; errors only surface at
//! construction and parsing boundaries.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("column {title:?} has an empty key")]
    EmptyColumnKey { title: String },

    #[error("invalid table configuration: {0}")]
    Config(#[source] serde_json::Error),

    #[error("invalid row data: {0}")]
    Data(#[source] serde_json::Error),

    #[error("unknown feature flag: {0}")]
    UnknownFeature(String),
}
