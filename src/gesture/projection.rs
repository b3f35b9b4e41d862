//! Maps normalized fingertip positions into the view's screen space.

use glam::Vec2;

use crate::landmark::LandmarkPoint;
use crate::options::{CaptureOrientation, ViewportOptions};

/// Projects normalized, top-left-origin landmarks into view points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjection {
    size: Vec2,
    orientation: CaptureOrientation,
}

impl ScreenProjection {
    /// Create a projection for a view of the given size and orientation.
    #[must_use]
    pub fn new(width: f32, height: f32, orientation: CaptureOrientation) -> Self {
        Self {
            size: Vec2::new(width, height),
            orientation,
        }
    }

    /// Create a projection from viewport options.
    #[must_use]
    pub fn from_options(viewport: &ViewportOptions) -> Self {
        Self::new(viewport.width, viewport.height, viewport.orientation)
    }

    /// View size in points.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Project a landmark into view coordinates.
    ///
    /// In portrait the capture buffer is a quarter turn off the view: the
    /// frame's y axis runs right-to-left across the view and its x axis runs
    /// down it.
    #[must_use]
    pub fn project(&self, point: LandmarkPoint) -> Vec2 {
        let normalized = match self.orientation {
            CaptureOrientation::Landscape => point.as_vec2(),
            CaptureOrientation::Portrait => Vec2::new(1.0 - point.y, point.x),
        };
        normalized * self.size
    }
}

impl Default for ScreenProjection {
    fn default() -> Self {
        Self::from_options(&ViewportOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_scales_directly() {
        let projection =
            ScreenProjection::new(800.0, 400.0, CaptureOrientation::Landscape);
        let p = projection.project(LandmarkPoint::new(0.25, 0.5));
        assert!((p - Vec2::new(200.0, 200.0)).length() < 1e-4);
    }

    #[test]
    fn portrait_swaps_and_flips_axes() {
        let projection =
            ScreenProjection::new(400.0, 800.0, CaptureOrientation::Portrait);
        let p = projection.project(LandmarkPoint::new(0.25, 0.40));
        assert!((p - Vec2::new(240.0, 200.0)).length() < 1e-3);
    }

    #[test]
    fn portrait_corners_land_on_view_corners() {
        let projection =
            ScreenProjection::new(400.0, 800.0, CaptureOrientation::Portrait);
        // Frame top-left is the view's top-right.
        let p = projection.project(LandmarkPoint::new(0.0, 0.0));
        assert!((p - Vec2::new(400.0, 0.0)).length() < 1e-4);
        // Frame bottom-right is the view's bottom-left.
        let q = projection.project(LandmarkPoint::new(1.0, 1.0));
        assert!((q - Vec2::new(0.0, 800.0)).length() < 1e-4);
    }
}
