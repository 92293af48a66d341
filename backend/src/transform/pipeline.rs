//! High-level pipeline: raw catalog → records → grouped view.
//!
//! The parser and grouper are pure; this layer adds input decoding,
//! progress logging and a summary of what was dropped along the way.
//!
//! # Example
//!
//! ```rust,ignore
//! use liftdex::{load_catalog, CatalogOptions};
//! use std::path::Path;
//!
//! let result = load_catalog(Path::new("exercises.csv"), &CatalogOptions::default())?;
//! for section in result.view.sections() {
//!     println!("{}: {} exercises", section.group, section.records.len());
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::grouper::index;
use crate::api::logs::{log_error, log_info, log_info_indent, log_success, log_warning};
use crate::config::default_group_order;
use crate::error::PipelineResult;
use crate::models::{GroupedView, Record};
use crate::parser::{decode_auto, parse_with_stats, read_file_auto, DecodedText};

/// Options for the catalog pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOptions {
    /// Groups shown first, in this order
    pub group_order: Vec<String>,

    /// Leave records without any target out of `CatalogResult::records`
    pub drop_untargeted: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            group_order: default_group_order(),
            drop_untargeted: false,
        }
    }
}

/// Result of running the pipeline over one catalog
#[derive(Debug, Clone)]
pub struct CatalogResult {
    /// Parsed records, in input order
    pub records: Vec<Record>,

    /// Records indexed by group
    pub view: GroupedView,

    /// Parsing metadata
    pub info: CatalogInfo,
}

/// Catalog input information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogInfo {
    pub encoding: String,
    pub header: Vec<String>,
    /// Records decoded, before `drop_untargeted`
    pub record_count: usize,
    /// Non-blank rows with fewer than 3 fields
    pub skipped_rows: usize,
    /// Records with no target at all
    pub untargeted: usize,
}

/// Load, parse and index a catalog file.
pub fn load_catalog(path: &Path, options: &CatalogOptions) -> PipelineResult<CatalogResult> {
    log_info(format!("📖 Reading catalog: {}", path.display()));
    let decoded = read_file_auto(path)?;
    log_success(format!("Detected encoding: {}", decoded.encoding));
    build_catalog(decoded, options)
}

/// Parse and index raw catalog bytes.
pub fn load_bytes(bytes: &[u8], options: &CatalogOptions) -> PipelineResult<CatalogResult> {
    log_info(format!("📖 Reading catalog ({} bytes)", bytes.len()));
    let decoded = decode_auto(bytes)?;
    log_success(format!("Detected encoding: {}", decoded.encoding));
    build_catalog(decoded, options)
}

/// Parse and index catalog text that is already decoded.
pub fn load_text(text: &str, options: &CatalogOptions) -> PipelineResult<CatalogResult> {
    let decoded = DecodedText {
        text: text.to_string(),
        encoding: "utf-8".to_string(),
    };
    build_catalog(decoded, options)
}

fn build_catalog(decoded: DecodedText, options: &CatalogOptions) -> PipelineResult<CatalogResult> {
    let parsed = parse_with_stats(&decoded.text).map_err(|e| {
        log_error(e.to_string());
        e
    })?;
    log_success(format!("Header: {}", parsed.header.join(", ")));
    log_success(format!("Decoded {} exercises", parsed.records.len()));

    if parsed.skipped_rows > 0 {
        log_warning(format!(
            "Skipped {} row(s) with fewer than 3 fields",
            parsed.skipped_rows
        ));
    }

    let record_count = parsed.records.len();
    let untargeted = parsed
        .records
        .iter()
        .filter(|r| r.targets().is_empty())
        .count();
    if untargeted > 0 {
        log_warning(format!("{} exercise(s) have no muscle group", untargeted));
    }

    log_info("📦 Grouping by muscle group...");
    let view = index(&parsed.records, options.group_order.as_slice());
    for section in view.sections() {
        log_info_indent(
            format!("{}: {}", section.group, section.records.len()),
            1,
        );
    }
    log_success(format!("{} groups visible", view.len()));

    let records = if options.drop_untargeted {
        parsed
            .records
            .into_iter()
            .filter(|r| !r.targets().is_empty())
            .collect()
    } else {
        parsed.records
    };

    Ok(CatalogResult {
        records,
        view,
        info: CatalogInfo {
            encoding: decoded.encoding,
            header: parsed.header,
            record_count,
            skipped_rows: parsed.skipped_rows,
            untargeted,
        },
    })
}
