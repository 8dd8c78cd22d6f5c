//! Common types used throughout gitlab-harvest
//!
//! Shared type aliases and small enums used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A single loosely typed item returned by the API (a project, a merge request)
pub type Record = JsonValue;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Merge Request State Filter
// ============================================================================

/// Value of the `state` query parameter on merge request listings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum StateFilter {
    /// Every merge request regardless of state
    #[default]
    All,
    Opened,
    Closed,
    Merged,
}

impl StateFilter {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::Merged => "merged",
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
