//! Gesture and viewport options with TOML preset support.
//!
//! Options serialize to/from TOML so tuned thresholds can be stored as
//! presets next to a recorded session.

mod gesture;
mod viewport;

use std::path::Path;

pub use gesture::{DistanceMetric, GestureOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use viewport::{CaptureOrientation, ViewportOptions};

use crate::error::PinchError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[gesture]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Pinch recognition and grab parameters.
    pub gesture: GestureOptions,
    /// View the pinch point is projected into.
    pub viewport: ViewportOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, PinchError> {
        let content = std::fs::read_to_string(path).map_err(PinchError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, PinchError> {
        toml::from_str(content)
            .map_err(|e| PinchError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), PinchError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PinchError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PinchError::Io)?;
        }
        std::fs::write(path, content).map_err(PinchError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
