//! Error types for PRD extraction and the CLI around it.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a `ralph-prd` run.
///
/// Malformed markdown never shows up here: unmatched scenarios, task lines or
/// missing sections degrade to empty values inside the extractors.
#[derive(Error, Debug)]
pub enum PrdError {
    #[error("Failed to read '{}': {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No user stories found in spec.md")]
    NoStoriesFound,

    #[error("Failed to write '{}': {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PRD does not match the Ralph schema: {}", problems.join("; "))]
    InvalidSchema { problems: Vec<String> },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for PRD operations
pub type PrdResult<T> = Result<T, PrdError>;
