//! Small shared utilities.

/// Frame pacing and smoothed frame-rate measurement.
pub mod frame_timing;

pub use frame_timing::FrameTiming;
