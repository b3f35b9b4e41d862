//! Recorded landmark traces for offline replay.
//!
//! A trace is JSON lines, one [`PinchObservation`] per captured frame:
//!
//! ```text
//! {"thumb_tip": [0.51, 0.48], "index_tip": [0.53, 0.49]}
//! {"thumb_tip": null, "index_tip": [0.60, 0.40]}
//! {}
//! ```
//!
//! Missing keys and `null` both mean the landmark was not detected. Blank
//! lines are skipped.

use std::path::Path;

use crate::error::PinchError;
use crate::landmark::PinchObservation;

/// Parse a JSON-lines trace.
///
/// # Errors
///
/// Returns [`PinchError::TraceParse`] naming the first malformed line.
pub fn parse_trace(content: &str) -> Result<Vec<PinchObservation>, PinchError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| PinchError::TraceParse {
                line: index + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Read and parse a JSON-lines trace file.
pub fn load_trace(path: &Path) -> Result<Vec<PinchObservation>, PinchError> {
    let content = std::fs::read_to_string(path)?;
    parse_trace(&content)
}

/// Serialize observations as a JSON-lines trace.
pub fn write_trace(frames: &[PinchObservation]) -> Result<String, PinchError> {
    let mut out = String::new();
    for frame in frames {
        let line = serde_json::to_string(frame)
            .map_err(|e| PinchError::OptionsParse(e.to_string()))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}
