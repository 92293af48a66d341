//! Error types for the Liftdex catalog pipeline.
//!
//! This module defines one error type per layer:
//!
//! - [`FormatError`] - Catalog header does not match the expected layout
//! - [`LoadError`] - Reading raw catalog bytes
//! - [`PipelineError`] - Top-level orchestration errors
//! - [`ServerError`] - HTTP layer errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Short data rows and malformed subregion pairs are not errors: the parser
//! skips them silently. Grouping cannot fail.

use thiserror::Error;

// =============================================================================
// Format Errors
// =============================================================================

/// Why a header line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderProblem {
    /// The input has no non-empty line at all.
    #[error("no header line found")]
    MissingHeader,

    /// The header has fewer than three columns.
    #[error("expected at least 3 columns, found {0}")]
    TooFewColumns(usize),

    /// A column does not carry the expected name.
    #[error("column {index} should be '{expected}', found '{found}'")]
    UnexpectedColumn {
        index: usize,
        expected: &'static str,
        found: String,
    },
}

/// The first non-empty line is not a valid catalog header.
///
/// Fatal to a parse call: no partial record list is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid catalog header '{header}': {problem}")]
pub struct FormatError {
    /// The offending header line, trimmed.
    pub header: String,
    /// What was wrong with it.
    pub problem: HeaderProblem,
}

impl FormatError {
    pub fn new(header: impl Into<String>, problem: HeaderProblem) -> Self {
        Self {
            header: header.into(),
            problem,
        }
    }
}

// =============================================================================
// Load Errors
// =============================================================================

/// Errors while reading raw catalog input.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Zero-byte input.
    #[error("Catalog input is empty")]
    EmptyInput,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::load_catalog`]
/// and its siblings.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Header mismatch.
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Raw input could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for header-checked parsing.
pub type FormatResult<T> = Result<T, FormatError>;

/// Result type for raw input loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
