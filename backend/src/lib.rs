//! # Liftdex - exercise catalog parsing and muscle-group indexing
//!
//! Liftdex decodes an exercise catalog written in a small CSV dialect and
//! re-indexes the exercises by muscle group for display.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Catalog CSV │────▶│   Parser    │────▶│   Grouper   │────▶│ Grouped view│
//! │  (bytes)    │     │  (records)  │     │ (by group)  │     │  (ordered)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use liftdex::{index, parse};
//!
//! let text = "Name,MuscleGroup,SubregionPairs
//! Bench Press,Chest,\"Chest,Mid Chest; Triceps,Lateral Head\"
//! Squat,Legs,";
//!
//! let records = parse(text).unwrap();
//! let view = index(&records, &["Legs", "Chest"]);
//!
//! assert_eq!(view.order(), &["Legs", "Chest", "Triceps"]);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per layer
//! - [`models`] - Domain models (Record, Target, GroupedView)
//! - [`parser`] - Catalog dialect parser and input decoding
//! - [`transform`] - Grouping and the end-to-end pipeline
//! - [`config`] - Environment-driven settings
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Grouping and pipeline
pub mod transform;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{FormatError, HeaderProblem, LoadError, PipelineError, ServerError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{GroupSection, GroupedView, Record, Target};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_auto,
    decode_content,
    detect_encoding,
    parse,
    parse_row,
    parse_with_stats,
    read_file_auto,
    split_fields,
    split_lines,
    split_pair,
    split_sub_items,
    DecodedText,
    ParsedCatalog,
};

// =============================================================================
// Re-exports - Grouping and pipeline
// =============================================================================

pub use transform::grouper::{index, targets_for_group};

pub use transform::pipeline::{
    load_bytes,
    load_catalog,
    load_text,
    CatalogInfo,
    CatalogOptions,
    CatalogResult,
};

// =============================================================================
// Re-exports - Config and API
// =============================================================================

pub use config::Settings;

pub use api::types::{error_response, CatalogResponse, ExercisePayload, GroupPayload};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
