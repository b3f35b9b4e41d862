//! Crate-level error types.

use std::fmt;

/// Errors produced by the pinchgrab crate.
///
/// None of these arise on the per-frame path: frame-level problems
/// (missing landmarks, hit-test misses, stale handles) are absorbed by the
/// controller and reported as a
/// [`Condition`](crate::manipulation::Condition) instead.
#[derive(Debug)]
pub enum PinchError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options or scene parsing/serialization failure.
    OptionsParse(String),
    /// A landmark trace line could not be parsed.
    TraceParse {
        /// 1-based line number in the trace.
        line: usize,
        /// Parser message.
        message: String,
    },
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
}

impl fmt::Display for PinchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::TraceParse { line, message } => {
                write!(f, "trace parse error on line {line}: {message}")
            }
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
        }
    }
}

impl std::error::Error for PinchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PinchError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Failure reported by a [`Scene`](crate::manipulation::Scene)
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The object handle no longer refers to a live scene object.
    InvalidHandle,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHandle => write!(f, "object handle is no longer valid"),
        }
    }
}

impl std::error::Error for SceneError {}
