//! Decides, per frame, whether the thumb and index fingertips are pinched.
//!
//! The detector is a pure function of the observation and its options, so
//! it may run on any thread (see [`crate::pipeline`]).

use glam::Vec2;

use crate::landmark::{LandmarkPoint, PinchObservation};
use crate::options::{DistanceMetric, GestureOptions};

/// Why a frame did not count as a pinch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoPinchReason {
    /// One or both fingertips were not detected this frame.
    MissingLandmark,
    /// Both fingertips were detected but are at least the threshold apart.
    Apart {
        /// Measured fingertip distance.
        distance: f32,
    },
}

/// Result of classifying one [`PinchObservation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pinch {
    /// Fingertips are closer than the pinch threshold.
    Pinched {
        /// Thumb tip.
        thumb_tip: LandmarkPoint,
        /// Index tip; its projection is the pinch screen point.
        index_tip: LandmarkPoint,
        /// Measured fingertip distance.
        distance: f32,
    },
    /// Not pinched this frame.
    NoPinch(NoPinchReason),
}

impl Pinch {
    /// Whether this frame is a pinch.
    #[must_use]
    pub fn is_pinched(&self) -> bool {
        matches!(self, Self::Pinched { .. })
    }
}

/// Classifies fingertip observations against a distance threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct PinchDetector {
    threshold: f32,
    metric: DistanceMetric,
    aspect: f32,
}

impl PinchDetector {
    /// Create a detector from gesture options.
    ///
    /// `aspect` is the viewport width over height; it only matters for
    /// [`DistanceMetric::AspectCorrected`].
    #[must_use]
    pub fn new(options: &GestureOptions, aspect: f32) -> Self {
        Self {
            threshold: options.pinch_threshold,
            metric: options.distance_metric,
            aspect,
        }
    }

    /// The configured pinch threshold.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Distance between two fingertips under the configured metric.
    #[must_use]
    pub fn distance(&self, a: LandmarkPoint, b: LandmarkPoint) -> f32 {
        let delta = a.as_vec2() - b.as_vec2();
        match self.metric {
            DistanceMetric::Normalized => delta.length(),
            DistanceMetric::AspectCorrected => {
                Vec2::new(delta.x * self.aspect, delta.y).length()
            }
        }
    }

    /// Classify one frame's observation.
    ///
    /// A distance exactly equal to the threshold is not a pinch.
    #[must_use]
    pub fn detect(&self, observation: &PinchObservation) -> Pinch {
        let Some((thumb_tip, index_tip)) = observation.pair() else {
            return Pinch::NoPinch(NoPinchReason::MissingLandmark);
        };

        let distance = self.distance(thumb_tip, index_tip);
        if distance < self.threshold {
            Pinch::Pinched {
                thumb_tip,
                index_tip,
                distance,
            }
        } else {
            Pinch::NoPinch(NoPinchReason::Apart { distance })
        }
    }
}

impl Default for PinchDetector {
    fn default() -> Self {
        Self::new(&GestureOptions::default(), 1.0)
    }
}
