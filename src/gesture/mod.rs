//! Pinch recognition: the pure fingertip-distance classifier and the
//! projection of the pinch point into view space.

/// Thumb-to-index distance classifier.
pub mod detector;
/// Normalized landmark to screen-point projection.
pub mod projection;

pub use detector::{NoPinchReason, Pinch, PinchDetector};
pub use projection::ScreenProjection;
