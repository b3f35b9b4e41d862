use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Orientation of the captured frames relative to the view.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CaptureOrientation {
    /// Frame axes line up with the view axes.
    #[default]
    Landscape,
    /// Frame is rotated a quarter turn relative to a portrait view.
    Portrait,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewport", inline)]
#[serde(default)]
/// Size and orientation of the view the pinch point is projected into.
pub struct ViewportOptions {
    /// View width in points.
    #[schemars(range(min = 1.0))]
    pub width: f32,
    /// View height in points.
    #[schemars(range(min = 1.0))]
    pub height: f32,
    /// Capture orientation relative to the view.
    pub orientation: CaptureOrientation,
}

impl ViewportOptions {
    /// Width over height, or 1.0 for a degenerate viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
            orientation: CaptureOrientation::Portrait,
        }
    }
}
