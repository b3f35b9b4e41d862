use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the thumb-to-index distance is measured.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Plain Euclidean distance in normalized image coordinates.
    #[default]
    Normalized,
    /// Scale the horizontal delta by the viewport aspect ratio first, so
    /// the threshold means the same physical spread on both axes.
    AspectCorrected,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gesture", inline)]
#[serde(default)]
/// Pinch recognition and grab parameters.
pub struct GestureOptions {
    /// Fingertip distance below which the hand counts as pinched.
    #[schemars(title = "Pinch Threshold", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub pinch_threshold: f32,
    /// World-space elevation applied to a grabbed object while held.
    #[schemars(title = "Height Offset", range(min = -2.0, max = 2.0), extend("step" = 0.01))]
    pub height_offset: f32,
    /// Distance metric used by the pinch detector.
    #[schemars(skip)]
    pub distance_metric: DistanceMetric,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.10,
            height_offset: 0.0,
            distance_metric: DistanceMetric::Normalized,
        }
    }
}
