//! In-memory [`Scene`] for tests, benchmarks and offline trace replay.
//!
//! Objects are screen-space discs with a world height. Hit-testing walks
//! objects in insertion order and returns the first disc containing the
//! point, the same "first result wins" rule a real scene query follows.

use std::path::Path;

use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{PinchError, SceneError};
use crate::manipulation::{InteractionMode, Scene};

/// Handle to an object in a [`SimScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// A simulated manipulable object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimObject {
    /// Optional label used in logs.
    pub name: String,
    /// Disc centre in view coordinates.
    pub center: Vec2,
    /// Disc radius in view points.
    pub radius: f32,
    /// Vertical world coordinate.
    pub height: f32,
    /// Current interaction mode.
    pub mode: InteractionMode,
}

impl SimObject {
    /// A free object at `center` with the given pick radius.
    #[must_use]
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            ..Self::default()
        }
    }

    fn contains(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

impl Default for SimObject {
    fn default() -> Self {
        Self {
            name: String::new(),
            center: Vec2::ZERO,
            radius: 20.0,
            height: 0.0,
            mode: InteractionMode::Free,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SceneFile {
    objects: Vec<SimObject>,
}

/// A flat collection of [`SimObject`]s.
#[derive(Debug, Clone, Default)]
pub struct SimScene {
    objects: FxHashMap<ObjectId, SimObject>,
    /// Insertion order, which is also hit-test order.
    order: Vec<ObjectId>,
    next_id: u32,
}

impl SimScene {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from TOML `[[objects]]` tables.
    pub fn from_toml(content: &str) -> Result<Self, PinchError> {
        let file: SceneFile = toml::from_str(content)
            .map_err(|e| PinchError::OptionsParse(e.to_string()))?;
        let mut scene = Self::new();
        for object in file.objects {
            let _ = scene.insert(object);
        }
        Ok(scene)
    }

    /// Load a scene from a TOML file.
    pub fn load(path: &Path) -> Result<Self, PinchError> {
        let content = std::fs::read_to_string(path).map_err(PinchError::Io)?;
        Self::from_toml(&content)
    }

    /// Add an object; it is hit-tested after all existing objects.
    pub fn insert(&mut self, object: SimObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let _ = self.objects.insert(id, object);
        self.order.push(id);
        id
    }

    /// Remove an object, invalidating its handle.
    pub fn remove(&mut self, id: ObjectId) -> Option<SimObject> {
        self.order.retain(|&other| other != id);
        self.objects.remove(&id)
    }

    /// Look up an object.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SimObject> {
        self.objects.get(&id)
    }

    /// Look up an object mutably.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SimObject> {
        self.objects.get_mut(&id)
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live objects in hit-test order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SimObject)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.objects.get(id).map(|o| (*id, o)))
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut SimObject, SceneError> {
        self.objects.get_mut(&id).ok_or(SceneError::InvalidHandle)
    }
}

impl Scene for SimScene {
    type Handle = ObjectId;

    fn hit_test(&self, point: Vec2) -> Option<ObjectId> {
        self.iter()
            .find(|(_, object)| object.contains(point))
            .map(|(id, _)| id)
    }

    fn interaction_mode(
        &self,
        handle: ObjectId,
    ) -> Result<InteractionMode, SceneError> {
        self.objects
            .get(&handle)
            .map(|o| o.mode)
            .ok_or(SceneError::InvalidHandle)
    }

    fn set_interaction_mode(
        &mut self,
        handle: ObjectId,
        mode: InteractionMode,
    ) -> Result<(), SceneError> {
        self.object_mut(handle)?.mode = mode;
        Ok(())
    }

    fn translate(
        &mut self,
        handle: ObjectId,
        point: Vec2,
    ) -> Result<(), SceneError> {
        self.object_mut(handle)?.center = point;
        Ok(())
    }

    fn set_vertical_offset(
        &mut self,
        handle: ObjectId,
        value: f32,
    ) -> Result<(), SceneError> {
        self.object_mut(handle)?.height = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_inserted_object_wins_overlaps() {
        let mut scene = SimScene::new();
        let a = scene.insert(SimObject::new(Vec2::new(10.0, 10.0), 10.0));
        let b = scene.insert(SimObject::new(Vec2::new(15.0, 10.0), 10.0));
        assert_eq!(scene.hit_test(Vec2::new(12.0, 10.0)), Some(a));
        assert_eq!(scene.hit_test(Vec2::new(24.0, 10.0)), Some(b));
        assert_eq!(scene.hit_test(Vec2::new(90.0, 90.0)), None);
    }

    #[test]
    fn removed_handles_are_invalid() {
        let mut scene = SimScene::new();
        let a = scene.insert(SimObject::new(Vec2::ZERO, 5.0));
        assert!(scene.remove(a).is_some());
        assert!(scene.is_empty());
        assert_eq!(scene.hit_test(Vec2::ZERO), None);
        assert_eq!(
            scene.translate(a, Vec2::ONE),
            Err(SceneError::InvalidHandle)
        );
        assert_eq!(scene.interaction_mode(a), Err(SceneError::InvalidHandle));
    }

    #[test]
    fn scene_parses_from_toml() {
        let toml_str = r#"
[[objects]]
name = "brick"
center = [100.0, 200.0]
radius = 30.0

[[objects]]
name = "plate"
center = [50.0, 50.0]
mode = "fixed"
"#;
        let scene = SimScene::from_toml(toml_str).unwrap();
        assert_eq!(scene.len(), 2);
        let (_, plate) = scene.iter().nth(1).unwrap();
        assert_eq!(plate.name, "plate");
        assert_eq!(plate.radius, 20.0);
        assert_eq!(plate.mode, InteractionMode::Fixed);
        let hit = scene.hit_test(Vec2::new(110.0, 210.0)).unwrap();
        assert_eq!(scene.get(hit).unwrap().name, "brick");
    }
}
