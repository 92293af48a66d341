//! HTTP API module.
//!
//! Serves grouped catalog views to display clients and streams pipeline logs.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{router, start_server, AppState};
pub use types::*;
