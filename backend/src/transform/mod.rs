//! Transformation module.
//!
//! - Grouper: records to a display-ordered group index
//! - Pipeline: decode, parse and group in one call

pub mod grouper;
pub mod pipeline;

pub use grouper::{index, targets_for_group};
pub use pipeline::*;
