//! The serialized per-frame path: detect, project, transition, apply.
//!
//! Every method takes `&mut self`, so the borrow checker enforces the
//! at-most-one in-flight frame rule. Detection itself is pure and can be
//! moved off thread with [`crate::pipeline::DetectionWorker`]; its readings
//! come back through [`PinchController::process_pinch`].

use super::command::ManipulationCommand;
use super::scene::{InteractionMode, Scene};
use super::state::{transition, Condition, ManipulationState, PinchSignal};
use crate::error::SceneError;
use crate::gesture::{Pinch, PinchDetector, ScreenProjection};
use crate::landmark::PinchObservation;
use crate::options::Options;

/// What happened during one controller step.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome<H> {
    /// Commands applied to the scene, in order. Empty on no-op frames.
    pub commands: Vec<ManipulationCommand<H>>,
    /// Condition absorbed this frame, if any.
    pub condition: Option<Condition>,
}

impl<H> FrameOutcome<H> {
    fn quiet() -> Self {
        Self {
            commands: Vec::new(),
            condition: None,
        }
    }
}

/// Turns pinch readings into grab / move / release commands against one
/// held object at a time.
///
/// # Usage
///
/// ```ignore
/// let mut controller = PinchController::new(&options);
/// // Once per captured frame, on the scene's thread:
/// let observation = landmarks.hand_landmarks(&frame);
/// let outcome = controller.process_observation(&mut scene, &observation);
/// ```
#[derive(Debug, Clone)]
pub struct PinchController<H> {
    detector: PinchDetector,
    projection: ScreenProjection,
    height_offset: f32,
    state: ManipulationState<H>,
    /// Mode of the held object before it was grabbed.
    saved_mode: Option<InteractionMode>,
}

impl<H: Copy + Eq + std::fmt::Debug> PinchController<H> {
    /// Create an idle controller from options.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            detector: PinchDetector::new(
                &options.gesture,
                options.viewport.aspect(),
            ),
            projection: ScreenProjection::from_options(&options.viewport),
            height_offset: options.gesture.height_offset,
            state: ManipulationState::Idle,
            saved_mode: None,
        }
    }

    /// Current manipulation state.
    #[must_use]
    pub fn state(&self) -> ManipulationState<H> {
        self.state
    }

    /// The pinch detector this controller classifies observations with.
    #[must_use]
    pub fn detector(&self) -> &PinchDetector {
        &self.detector
    }

    /// Height a held object is pinned to.
    #[must_use]
    pub fn height_offset(&self) -> f32 {
        self.height_offset
    }

    /// Change the height held objects are pinned to. Takes effect on the
    /// next move.
    pub fn set_height_offset(&mut self, value: f32) {
        self.height_offset = value;
    }

    /// Run detection on `observation` and step the state machine.
    pub fn process_observation<S>(
        &mut self,
        scene: &mut S,
        observation: &PinchObservation,
    ) -> FrameOutcome<H>
    where
        S: Scene<Handle = H>,
    {
        let pinch = self.detector.detect(observation);
        self.process_pinch(scene, &pinch)
    }

    /// Step the state machine with a pinch classified elsewhere.
    pub fn process_pinch<S>(&mut self, scene: &mut S, pinch: &Pinch) -> FrameOutcome<H>
    where
        S: Scene<Handle = H>,
    {
        let signal = match *pinch {
            Pinch::Pinched { index_tip, .. } => PinchSignal::Pinched {
                point: self.projection.project(index_tip),
            },
            Pinch::NoPinch(reason) => PinchSignal::NoPinch(reason),
        };

        let step = transition(self.state, signal, self.height_offset, |point| {
            scene.hit_test(point)
        });
        self.state = step.state;

        let Some(command) = step.command else {
            return FrameOutcome {
                commands: Vec::new(),
                condition: step.condition,
            };
        };

        match command {
            ManipulationCommand::BeginGrab { handle } => {
                self.begin_grab(scene, handle, step.condition)
            }
            ManipulationCommand::MoveTo {
                handle,
                target,
                height,
            } => {
                let moved = scene
                    .translate(handle, target)
                    .and_then(|()| scene.set_vertical_offset(handle, height));
                if moved.is_err() {
                    log::warn!("held object {handle:?} vanished mid-grab; releasing");
                    return self.force_release(scene, handle);
                }
                log::debug!("moved {handle:?} to {target} at height {height}");
                FrameOutcome {
                    commands: vec![command],
                    condition: step.condition,
                }
            }
            ManipulationCommand::EndGrab { handle } => {
                let condition = if self.end_grab(scene, handle).is_ok() {
                    step.condition
                } else {
                    Some(Condition::InvalidHandle)
                };
                FrameOutcome {
                    commands: vec![command],
                    condition,
                }
            }
        }
    }

    /// Release the held object outside the normal frame flow, e.g. when
    /// the tracking session is interrupted. Does nothing when idle.
    pub fn release<S>(&mut self, scene: &mut S) -> FrameOutcome<H>
    where
        S: Scene<Handle = H>,
    {
        match self.state {
            ManipulationState::Idle => FrameOutcome::quiet(),
            ManipulationState::Grabbing(handle) => {
                self.state = ManipulationState::Idle;
                let condition = self
                    .end_grab(scene, handle)
                    .err()
                    .map(|_| Condition::InvalidHandle);
                FrameOutcome {
                    commands: vec![ManipulationCommand::EndGrab { handle }],
                    condition,
                }
            }
        }
    }

    fn begin_grab<S>(
        &mut self,
        scene: &mut S,
        handle: H,
        condition: Option<Condition>,
    ) -> FrameOutcome<H>
    where
        S: Scene<Handle = H>,
    {
        let grabbed = scene.interaction_mode(handle).and_then(|mode| {
            scene.set_interaction_mode(handle, InteractionMode::Fixed)?;
            Ok(mode)
        });

        match grabbed {
            Ok(mode) => {
                self.saved_mode = Some(mode);
                log::info!("grabbed {handle:?} (was {mode:?})");
                FrameOutcome {
                    commands: vec![ManipulationCommand::BeginGrab { handle }],
                    condition,
                }
            }
            Err(e) => {
                log::warn!("hit-test returned unusable object {handle:?}: {e}");
                self.state = ManipulationState::Idle;
                FrameOutcome {
                    commands: Vec::new(),
                    condition: Some(Condition::InvalidHandle),
                }
            }
        }
    }

    /// Restore the pre-grab mode. Fails when the held object is already
    /// gone; the release still counts.
    fn end_grab<S>(&mut self, scene: &mut S, handle: H) -> Result<(), SceneError>
    where
        S: Scene<Handle = H>,
    {
        let mode = self.saved_mode.take().unwrap_or_default();
        match scene.set_interaction_mode(handle, mode) {
            Ok(()) => {
                log::info!("released {handle:?} (restored {mode:?})");
                Ok(())
            }
            Err(e) => {
                log::warn!("released {handle:?} but it is no longer in the scene: {e}");
                Err(e)
            }
        }
    }

    fn force_release<S>(&mut self, scene: &mut S, handle: H) -> FrameOutcome<H>
    where
        S: Scene<Handle = H>,
    {
        self.state = ManipulationState::Idle;
        let _ = self.end_grab(scene, handle);
        FrameOutcome {
            commands: vec![ManipulationCommand::EndGrab { handle }],
            condition: Some(Condition::InvalidHandle),
        }
    }
}

impl<H: Copy + Eq + std::fmt::Debug> Default for PinchController<H> {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::gesture::NoPinchReason;
    use crate::landmark::LandmarkPoint;
    use crate::options::CaptureOrientation;
    use crate::sim::{ObjectId, SimObject, SimScene};

    /// 100×100 landscape view so landmark (x, y) projects to (100x, 100y).
    fn options() -> Options {
        let mut opts = Options::default();
        opts.viewport.width = 100.0;
        opts.viewport.height = 100.0;
        opts.viewport.orientation = CaptureOrientation::Landscape;
        opts
    }

    fn scene_with_cube() -> (SimScene, ObjectId) {
        let mut scene = SimScene::new();
        let id = scene.insert(SimObject::new(Vec2::new(50.0, 50.0), 10.0));
        (scene, id)
    }

    fn pinch_at(x: f32, y: f32) -> PinchObservation {
        PinchObservation::new(
            LandmarkPoint::new(x + 0.02, y),
            LandmarkPoint::new(x, y),
        )
    }

    fn open_hand() -> PinchObservation {
        PinchObservation::new(
            LandmarkPoint::new(0.1, 0.1),
            LandmarkPoint::new(0.9, 0.9),
        )
    }

    #[test]
    fn pinch_on_empty_space_emits_nothing() {
        let (mut scene, _) = scene_with_cube();
        let mut controller = PinchController::new(&options());
        let outcome = controller.process_observation(&mut scene, &pinch_at(0.1, 0.1));
        assert!(outcome.commands.is_empty());
        assert_eq!(outcome.condition, Some(Condition::NoTargetUnderPinch));
        assert_eq!(controller.state(), ManipulationState::Idle);
    }

    #[test]
    fn grab_move_release_round_trip() {
        let (mut scene, id) = scene_with_cube();
        let mut opts = options();
        opts.gesture.height_offset = 0.3;
        let mut controller = PinchController::new(&opts);

        let begin = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));
        assert_eq!(begin.commands, vec![ManipulationCommand::BeginGrab { handle: id }]);
        assert_eq!(controller.state(), ManipulationState::Grabbing(id));
        assert_eq!(scene.get(id).unwrap().mode, InteractionMode::Fixed);

        let moved = controller.process_observation(&mut scene, &pinch_at(0.7, 0.6));
        assert_eq!(moved.commands.len(), 1);
        let cube = scene.get(id).unwrap();
        assert!((cube.center - Vec2::new(70.0, 60.0)).length() < 1e-3);
        assert_eq!(cube.height, 0.3);

        let end = controller.process_observation(&mut scene, &open_hand());
        assert_eq!(end.commands, vec![ManipulationCommand::EndGrab { handle: id }]);
        assert_eq!(controller.state(), ManipulationState::Idle);
        assert_eq!(scene.get(id).unwrap().mode, InteractionMode::Free);

        let after = controller.process_observation(&mut scene, &open_hand());
        assert!(after.commands.is_empty());
    }

    #[test]
    fn release_restores_pre_grab_mode() {
        let (mut scene, id) = scene_with_cube();
        scene.get_mut(id).unwrap().mode = InteractionMode::Fixed;
        let mut controller = PinchController::new(&options());

        let _ = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));
        let _ = controller.process_observation(&mut scene, &open_hand());
        assert_eq!(scene.get(id).unwrap().mode, InteractionMode::Fixed);
    }

    #[test]
    fn repeated_pinches_each_move_once() {
        let (mut scene, id) = scene_with_cube();
        let mut controller = PinchController::new(&options());
        let _ = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));
        for i in 0..4 {
            let x = 0.5 + i as f32 * 0.05;
            let outcome = controller.process_observation(&mut scene, &pinch_at(x, 0.5));
            assert_eq!(outcome.commands.len(), 1);
            assert!(matches!(
                outcome.commands[0],
                ManipulationCommand::MoveTo { handle, .. } if handle == id
            ));
            assert_eq!(controller.state(), ManipulationState::Grabbing(id));
        }
    }

    #[test]
    fn height_offset_change_applies_to_next_move() {
        let (mut scene, id) = scene_with_cube();
        let mut controller = PinchController::new(&options());
        let _ = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));
        controller.set_height_offset(1.25);
        let _ = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));
        assert_eq!(scene.get(id).unwrap().height, 1.25);
    }

    #[test]
    fn vanished_object_forces_release() {
        let (mut scene, id) = scene_with_cube();
        let mut controller = PinchController::new(&options());
        let _ = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));
        assert!(scene.remove(id).is_some());

        let outcome = controller.process_observation(&mut scene, &pinch_at(0.6, 0.5));
        assert_eq!(outcome.commands, vec![ManipulationCommand::EndGrab { handle: id }]);
        assert_eq!(outcome.condition, Some(Condition::InvalidHandle));
        assert_eq!(controller.state(), ManipulationState::Idle);

        // Next open-hand frame must not release a second time.
        let after = controller.process_observation(&mut scene, &open_hand());
        assert!(after.commands.is_empty());
    }

    #[test]
    fn releasing_a_vanished_object_reports_invalid_handle() {
        let (mut scene, id) = scene_with_cube();
        let mut controller = PinchController::new(&options());
        let _ = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));
        assert!(scene.remove(id).is_some());

        let outcome = controller.process_observation(&mut scene, &open_hand());
        assert_eq!(outcome.commands, vec![ManipulationCommand::EndGrab { handle: id }]);
        assert_eq!(outcome.condition, Some(Condition::InvalidHandle));
        assert_eq!(controller.state(), ManipulationState::Idle);
    }

    #[test]
    fn explicit_release_of_a_vanished_object_reports_invalid_handle() {
        let (mut scene, id) = scene_with_cube();
        let mut controller = PinchController::new(&options());
        let _ = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));
        assert!(scene.remove(id).is_some());

        let outcome = controller.release(&mut scene);
        assert_eq!(outcome.commands, vec![ManipulationCommand::EndGrab { handle: id }]);
        assert_eq!(outcome.condition, Some(Condition::InvalidHandle));
        assert!(controller.release(&mut scene).commands.is_empty());
    }

    /// Scene whose hit test always reports an object it does not contain.
    struct StaleHitScene(SimScene);

    impl Scene for StaleHitScene {
        type Handle = ObjectId;

        fn hit_test(&self, _point: Vec2) -> Option<ObjectId> {
            Some(ObjectId(99))
        }

        fn interaction_mode(
            &self,
            handle: ObjectId,
        ) -> Result<InteractionMode, SceneError> {
            self.0.interaction_mode(handle)
        }

        fn set_interaction_mode(
            &mut self,
            handle: ObjectId,
            mode: InteractionMode,
        ) -> Result<(), SceneError> {
            self.0.set_interaction_mode(handle, mode)
        }

        fn translate(&mut self, handle: ObjectId, point: Vec2) -> Result<(), SceneError> {
            self.0.translate(handle, point)
        }

        fn set_vertical_offset(
            &mut self,
            handle: ObjectId,
            value: f32,
        ) -> Result<(), SceneError> {
            self.0.set_vertical_offset(handle, value)
        }
    }

    #[test]
    fn stale_hit_abandons_the_grab() {
        let (scene, _) = scene_with_cube();
        let mut scene = StaleHitScene(scene);
        let mut controller = PinchController::new(&options());

        let outcome = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));
        assert!(outcome.commands.is_empty());
        assert_eq!(outcome.condition, Some(Condition::InvalidHandle));
        assert_eq!(controller.state(), ManipulationState::Idle);

        // Nothing held, so an open hand releases nothing.
        let after = controller.process_observation(&mut scene, &open_hand());
        assert!(after.commands.is_empty());
        assert_eq!(after.condition, None);
    }

    #[test]
    fn missing_landmarks_release_a_held_object() {
        let (mut scene, id) = scene_with_cube();
        let mut controller = PinchController::new(&options());
        let _ = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));
        let outcome =
            controller.process_observation(&mut scene, &PinchObservation::empty());
        assert_eq!(outcome.commands, vec![ManipulationCommand::EndGrab { handle: id }]);
        assert_eq!(outcome.condition, Some(Condition::MissingLandmark));
    }

    #[test]
    fn explicit_release_is_idempotent() {
        let (mut scene, id) = scene_with_cube();
        let mut controller = PinchController::new(&options());
        let _ = controller.process_observation(&mut scene, &pinch_at(0.5, 0.5));

        let first = controller.release(&mut scene);
        assert_eq!(first.commands, vec![ManipulationCommand::EndGrab { handle: id }]);
        assert_eq!(scene.get(id).unwrap().mode, InteractionMode::Free);
        assert!(controller.release(&mut scene).commands.is_empty());
    }

    #[test]
    fn off_thread_readings_drive_the_same_path() {
        let (mut scene, id) = scene_with_cube();
        let mut controller = PinchController::new(&options());
        let pinch = controller.detector().detect(&pinch_at(0.5, 0.5));
        let outcome = controller.process_pinch(&mut scene, &pinch);
        assert_eq!(outcome.commands, vec![ManipulationCommand::BeginGrab { handle: id }]);

        let apart = Pinch::NoPinch(NoPinchReason::Apart { distance: 0.5 });
        let outcome = controller.process_pinch(&mut scene, &apart);
        assert_eq!(outcome.commands, vec![ManipulationCommand::EndGrab { handle: id }]);
    }
}
