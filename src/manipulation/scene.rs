use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Whether external physics may move an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Kinematic: only explicit transforms move the object.
    Fixed,
    /// Dynamic: the physics simulation owns the object's motion.
    #[default]
    Free,
}

/// The rendering/AR layer that owns manipulable objects.
///
/// The controller never holds geometry or transforms, only
/// [`Handle`](Scene::Handle)s, and asks the scene to change them.
pub trait Scene {
    /// Opaque reference to a scene object.
    type Handle: Copy + Eq + std::fmt::Debug;

    /// The manipulable object under `point` (view coordinates), if any.
    ///
    /// When several objects overlap, the first result of the scene's own
    /// query is returned.
    fn hit_test(&self, point: Vec2) -> Option<Self::Handle>;

    /// Current interaction mode of `handle`.
    fn interaction_mode(
        &self,
        handle: Self::Handle,
    ) -> Result<InteractionMode, SceneError>;

    /// Switch `handle` between fixed and free.
    fn set_interaction_mode(
        &mut self,
        handle: Self::Handle,
        mode: InteractionMode,
    ) -> Result<(), SceneError>;

    /// Move `handle` toward the view point `point`, using whatever
    /// projection the scene owns.
    fn translate(
        &mut self,
        handle: Self::Handle,
        point: Vec2,
    ) -> Result<(), SceneError>;

    /// Pin the vertical world coordinate of `handle`.
    fn set_vertical_offset(
        &mut self,
        handle: Self::Handle,
        value: f32,
    ) -> Result<(), SceneError>;
}
