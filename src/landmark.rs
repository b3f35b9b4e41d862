//! Normalized hand landmarks delivered once per processed video frame.
//!
//! All points entering the crate use one convention: normalized image
//! coordinates in `[0, 1]`, origin at the top-left, y growing downward.
//! Sources that report bottom-left origin points (Vision-style) convert at
//! the boundary with [`LandmarkPoint::from_bottom_left`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A fingertip position in normalized, top-left-origin image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct LandmarkPoint {
    /// Horizontal position, 0 = left edge, 1 = right edge.
    pub x: f32,
    /// Vertical position, 0 = top edge, 1 = bottom edge.
    pub y: f32,
}

impl LandmarkPoint {
    /// Create a point already in top-left-origin coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert a bottom-left-origin point (y grows upward).
    #[must_use]
    pub fn from_bottom_left(x: f32, y: f32) -> Self {
        Self { x, y: 1.0 - y }
    }

    /// The point as a vector.
    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<[f32; 2]> for LandmarkPoint {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<LandmarkPoint> for [f32; 2] {
    fn from(p: LandmarkPoint) -> Self {
        [p.x, p.y]
    }
}

impl From<Vec2> for LandmarkPoint {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// The thumb and index fingertips detected in one frame.
///
/// Either landmark may be missing when no hand was found or the landmark
/// confidence was too low.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchObservation {
    /// Thumb tip, if detected.
    pub thumb_tip: Option<LandmarkPoint>,
    /// Index fingertip, if detected.
    pub index_tip: Option<LandmarkPoint>,
}

impl PinchObservation {
    /// Observation with both fingertips present.
    #[must_use]
    pub const fn new(thumb_tip: LandmarkPoint, index_tip: LandmarkPoint) -> Self {
        Self {
            thumb_tip: Some(thumb_tip),
            index_tip: Some(index_tip),
        }
    }

    /// Observation for a frame with no hand.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            thumb_tip: None,
            index_tip: None,
        }
    }

    /// Both fingertips, or `None` if either is missing.
    #[must_use]
    pub fn pair(&self) -> Option<(LandmarkPoint, LandmarkPoint)> {
        Some((self.thumb_tip?, self.index_tip?))
    }
}

/// Runs hand-landmark inference on one captured frame.
///
/// Implemented by the platform's pose/landmark model. Returning a
/// partially or fully empty observation is the normal "no hand" outcome,
/// not an error.
pub trait LandmarkSource {
    /// The captured frame type (pixel buffer, sample buffer, ...).
    type Frame;

    /// Extract thumb and index fingertips from `frame`.
    fn hand_landmarks(&mut self, frame: &Self::Frame) -> PinchObservation;
}
