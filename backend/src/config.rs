//! Runtime configuration.
//!
//! Settings come from the environment (a `.env` file is loaded by the CLI at
//! start-up), with built-in defaults for anything unset.
//!
//! | Variable              | Meaning                              | Default        |
//! |-----------------------|--------------------------------------|----------------|
//! | `LIFTDEX_GROUP_ORDER` | Comma-separated preferred group order | [`DEFAULT_GROUP_ORDER`] |
//! | `LIFTDEX_PORT`        | HTTP server port                     | `3000`         |

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable holding the preferred group order.
pub const GROUP_ORDER_VAR: &str = "LIFTDEX_GROUP_ORDER";

/// Environment variable holding the server port.
pub const PORT_VAR: &str = "LIFTDEX_PORT";

/// Display order used when none is configured.
pub const DEFAULT_GROUP_ORDER: &[&str] = &[
    "Chest", "Back", "Shoulder", "Biceps", "Triceps", "Legs", "Glutes", "Core",
];

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Groups shown first, in this order.
    pub group_order: Vec<String>,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            group_order: default_group_order(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(env::var(GROUP_ORDER_VAR).ok(), env::var(PORT_VAR).ok())
    }

    /// Build settings from raw variable values. Unset or unusable values
    /// fall back to the defaults.
    pub fn from_vars(group_order: Option<String>, port: Option<String>) -> Self {
        let group_order = group_order
            .map(|raw| parse_group_list(&raw))
            .filter(|groups| !groups.is_empty())
            .unwrap_or_else(default_group_order);
        let port = port
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { group_order, port }
    }
}

pub fn default_group_order() -> Vec<String> {
    DEFAULT_GROUP_ORDER.iter().map(|g| g.to_string()).collect()
}

/// Parse `"Chest, Legs,,Core"` into `["Chest", "Legs", "Core"]`.
pub fn parse_group_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}
