//! The retargeting pipeline: one solve result in, damped rig mutations out.
//!
//! Each frame runs in two phases. *Interpret* validates the solve result and
//! computes a complete [`FramePlan`] with read-only access to skeleton and
//! smoothing state; any failure drops the frame before anything has been
//! touched. *Commit* applies the plan. The result is a two-state machine:
//! frames either land in full (`Tracking`) or are invisible (`Lost`), and the
//! next valid frame resumes tracking with no recovery logic.

pub mod constants;
pub mod face;
pub mod gaze;
pub mod hands;
pub mod tables;

use glam::{Quat, Vec3};

use crate::config::RetargetTuning;
use crate::rig::apply::{damped_rotation, place_toward, rotate_toward_quat};
use crate::rig::{HumanoidBone, HumanoidSkeleton, Side};
use crate::solve::{EulerTriple, SolveError, SolveResult};

pub use face::{ExpressionState, ExpressionWeights, Viseme};
pub use gaze::GazeSmoothState;

use constants::{
    DEFAULT_BLEND, DEFAULT_DAMPENER, HIPS_POSITION_BLEND, HIPS_Y_OFFSET, NECK_DAMPENER,
};

/// What happened to one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was interpreted and applied
    Tracking,
    /// The frame could not be interpreted; nothing was mutated
    Lost,
}

impl FrameOutcome {
    pub fn is_tracking(&self) -> bool {
        matches!(self, FrameOutcome::Tracking)
    }
}

/// Recurrent smoothing state for one avatar, threaded through every
/// retargeting call. Never global: two avatars carry two of these.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothingState {
    pub gaze: GazeSmoothState,
    pub expression: ExpressionState,
}

impl SmoothingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recurrence, e.g. when the avatar model is replaced.
    pub fn reset(&mut self) {
        self.gaze.reset();
        self.expression.reset();
    }
}

/// A planned bone rotation: damped target quaternion plus blend factor.
#[derive(Debug, Clone, Copy)]
pub struct RotationOp {
    pub bone: HumanoidBone,
    pub target: Quat,
    pub blend: f32,
}

impl RotationOp {
    pub fn from_euler(bone: HumanoidBone, euler_rad: EulerTriple, dampener: f32, blend: f32) -> Self {
        Self {
            bone,
            target: damped_rotation(euler_rad, dampener),
            blend,
        }
    }
}

/// A planned bone placement.
#[derive(Debug, Clone, Copy)]
struct PositionOp {
    bone: HumanoidBone,
    position: Vec3,
    dampener: f32,
    blend: f32,
}

/// Everything one frame wants to change, computed before anything changes.
#[derive(Default)]
struct FramePlan {
    rotations: Vec<RotationOp>,
    positions: Vec<PositionOp>,
    face: Option<face::FacePlan>,
    gaze: Option<gaze::GazePlan>,
}

/// The per-frame solve-to-rig mapping.
#[derive(Debug, Clone)]
pub struct Retargeter {
    tuning: RetargetTuning,
}

impl Retargeter {
    pub fn new(tuning: RetargetTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &RetargetTuning {
        &self.tuning
    }

    /// Run one frame against a skeleton and its smoothing state.
    ///
    /// Never returns an error: an uninterpretable frame is reported as
    /// [`FrameOutcome::Lost`] and leaves every bone transform, expression
    /// weight, and piece of recurrent state exactly as it was.
    pub fn retarget(
        &self,
        skeleton: &mut HumanoidSkeleton,
        weights: &mut ExpressionWeights,
        state: &mut SmoothingState,
        solve: &SolveResult,
    ) -> FrameOutcome {
        let plan = match self.plan(solve, state) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::debug!("dropping frame: {err}");
                return FrameOutcome::Lost;
            }
        };

        Self::commit(plan, skeleton, weights, state);
        FrameOutcome::Tracking
    }

    /// Interpret phase: read-only, fallible.
    fn plan(&self, solve: &SolveResult, state: &SmoothingState) -> Result<FramePlan, SolveError> {
        solve.validate()?;

        let mut plan = FramePlan::default();

        if let Some(pose) = &solve.pose {
            for entry in tables::POSE_ROTATIONS {
                plan.rotations.push(RotationOp::from_euler(
                    entry.bone,
                    (entry.source)(pose),
                    entry.dampener,
                    entry.blend,
                ));
            }

            let p = pose.hips_position;
            // World-space hip targets arrive in the solver's mirrored frame
            let position = if pose.world_space {
                Vec3::new(-p[0], p[1] + HIPS_Y_OFFSET, -p[2])
            } else {
                Vec3::new(p[0], p[1] + HIPS_Y_OFFSET, p[2])
            };
            plan.positions.push(PositionOp {
                bone: HumanoidBone::Hips,
                position,
                dampener: DEFAULT_DAMPENER,
                blend: HIPS_POSITION_BLEND,
            });
        }

        if let Some(face_solve) = &solve.face {
            let s = self.tuning.head_sensitivity;
            let head = [
                face_solve.head_rotation[0] * s,
                face_solve.head_rotation[1] * s,
                face_solve.head_rotation[2] * s,
            ];
            plan.rotations.push(RotationOp::from_euler(
                HumanoidBone::Neck,
                head,
                NECK_DAMPENER,
                DEFAULT_BLEND,
            ));

            plan.face = Some(face::plan(&state.expression, face_solve, &self.tuning));
            plan.gaze = Some(gaze::plan(&state.gaze, face_solve.pupil, &self.tuning));
        }

        // A hand is rigged only when its finger solve AND the pose solve are
        // both present; the wrist basis comes from the two combined.
        for side in Side::BOTH {
            if let (Some(pose), Some(hand)) = (&solve.pose, solve.hand(side)) {
                hands::plan(side, pose, hand, &mut plan.rotations);
            }
        }

        Ok(plan)
    }

    /// Commit phase: infallible, mutates skeleton, weights, and recurrence.
    fn commit(
        plan: FramePlan,
        skeleton: &mut HumanoidSkeleton,
        weights: &mut ExpressionWeights,
        state: &mut SmoothingState,
    ) {
        for op in &plan.rotations {
            rotate_toward_quat(skeleton, op.bone, op.target, op.blend);
        }
        for op in &plan.positions {
            place_toward(skeleton, op.bone, op.position, op.dampener, op.blend);
        }
        if let Some(face_plan) = plan.face {
            *weights = face_plan;
            state.expression.store(face_plan.visemes, face_plan.blink);
        }
        if let Some(gaze_plan) = plan.gaze {
            skeleton.set_look_at_target(gaze_plan.look_at);
            state.gaze.store(gaze_plan.angle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve::{FaceSolve, HandSolve, MouthShapes, PoseSolve};

    fn retargeter() -> Retargeter {
        Retargeter::new(RetargetTuning::default())
    }

    fn face_solve() -> FaceSolve {
        FaceSolve {
            head_rotation: [0.2, -0.1, 0.05],
            eye_open_left: 0.9,
            eye_open_right: 0.9,
            pupil: [0.3, -0.2],
            mouth: MouthShapes {
                aa: 1.0,
                ..Default::default()
            },
            mouth_open: 0.6,
            mouth_smile: 0.2,
            ..Default::default()
        }
    }

    fn pose_solve() -> PoseSolve {
        PoseSolve {
            hips_rotation: [0.1, 0.2, 0.0],
            hips_position: [0.05, 0.0, 0.1],
            spine: [0.15, -0.1, 0.05],
            left_upper_arm: [0.4, 0.2, -0.1],
            right_lower_leg: [0.3, 0.0, 0.0],
            left_hand: [0.0, 0.0, 0.25],
            ..Default::default()
        }
    }

    fn snapshot(skeleton: &HumanoidSkeleton) -> Vec<(HumanoidBone, crate::rig::BoneTransform)> {
        skeleton.iter().map(|(b, t)| (b, *t)).collect()
    }

    #[test]
    fn test_face_only_frame_touches_only_face_state() {
        let retargeter = retargeter();
        let mut skeleton = HumanoidSkeleton::full();
        let mut weights = ExpressionWeights::default();
        let mut state = SmoothingState::new();

        let before = snapshot(&skeleton);
        let solve = SolveResult {
            face: Some(face_solve()),
            ..Default::default()
        };

        let outcome = retargeter.retarget(&mut skeleton, &mut weights, &mut state, &solve);
        assert!(outcome.is_tracking());

        // Every bone except the neck is untouched
        for (bone, transform) in before {
            let now = skeleton.bone(bone).unwrap();
            if bone == HumanoidBone::Neck {
                assert_ne!(*now, transform, "neck should follow head rotation");
            } else {
                assert_eq!(*now, transform, "{bone} must not move on a face-only frame");
            }
        }

        // Expression, gaze, and look-at all updated
        assert!((weights.viseme(Viseme::Aa) - 0.5).abs() < 1e-6);
        assert!(weights.mouth_open > 0.0);
        assert_ne!(state.gaze, GazeSmoothState::default());
        assert_ne!(skeleton.look_at_target(), Vec3::ZERO);
    }

    #[test]
    fn test_pose_frame_drives_table_bones() {
        let retargeter = retargeter();
        let mut skeleton = HumanoidSkeleton::full();
        let mut weights = ExpressionWeights::default();
        let mut state = SmoothingState::new();

        let solve = SolveResult {
            pose: Some(pose_solve()),
            ..Default::default()
        };
        retargeter.retarget(&mut skeleton, &mut weights, &mut state, &solve);

        let rest = Quat::IDENTITY;
        for bone in [
            HumanoidBone::Hips,
            HumanoidBone::Spine,
            HumanoidBone::Chest,
            HumanoidBone::LeftUpperArm,
            HumanoidBone::RightLowerLeg,
        ] {
            let rotation = skeleton.bone(bone).unwrap().rotation;
            assert!(rotation.angle_between(rest) > 1e-4, "{bone} should have moved");
        }

        // Hip placement: y offset applied, slow blend
        let hips = skeleton.bone(HumanoidBone::Hips).unwrap();
        let expected = Vec3::new(0.05, 1.0, 0.1) * HIPS_POSITION_BLEND;
        assert!((hips.position - expected).length() < 1e-5);

        // No face data: weights and gaze untouched
        assert_eq!(weights, ExpressionWeights::default());
        assert_eq!(state.gaze, GazeSmoothState::default());
    }

    #[test]
    fn test_world_space_hips_mirrored() {
        let retargeter = retargeter();
        let mut skeleton = HumanoidSkeleton::full();
        let mut weights = ExpressionWeights::default();
        let mut state = SmoothingState::new();

        let mut pose = pose_solve();
        pose.world_space = true;
        pose.hips_position = [0.2, 0.1, 0.4];
        let solve = SolveResult {
            pose: Some(pose),
            ..Default::default()
        };
        retargeter.retarget(&mut skeleton, &mut weights, &mut state, &solve);

        let pos = skeleton.bone(HumanoidBone::Hips).unwrap().position;
        let expected = Vec3::new(-0.2, 1.1, -0.4) * HIPS_POSITION_BLEND;
        assert!((pos - expected).length() < 1e-5);
    }

    #[test]
    fn test_hand_without_pose_is_skipped() {
        let retargeter = retargeter();
        let mut skeleton = HumanoidSkeleton::full();
        let mut weights = ExpressionWeights::default();
        let mut state = SmoothingState::new();

        let mut hand = HandSolve::default();
        hand.wrist = [0.3, 0.2, 0.1];
        hand.fingers[0][0] = [0.0, 0.0, 0.5];

        let solve = SolveResult {
            left_hand: Some(hand),
            ..Default::default()
        };
        let outcome = retargeter.retarget(&mut skeleton, &mut weights, &mut state, &solve);
        assert!(outcome.is_tracking());

        // No pose solve this frame → the whole hand stays put
        assert_eq!(
            skeleton.bone(HumanoidBone::LeftHand).unwrap().rotation,
            Quat::IDENTITY
        );
        assert_eq!(
            skeleton
                .bone(HumanoidBone::LeftThumbProximal)
                .unwrap()
                .rotation,
            Quat::IDENTITY
        );
    }

    #[test]
    fn test_hand_with_pose_is_rigged() {
        let retargeter = retargeter();
        let mut skeleton = HumanoidSkeleton::full();
        let mut weights = ExpressionWeights::default();
        let mut state = SmoothingState::new();

        let mut hand = HandSolve::default();
        hand.wrist = [0.3, 0.2, 0.0];
        hand.fingers[1][2] = [0.0, 0.0, 0.6];

        let solve = SolveResult {
            pose: Some(pose_solve()),
            left_hand: Some(hand),
            ..Default::default()
        };
        retargeter.retarget(&mut skeleton, &mut weights, &mut state, &solve);

        let wrist = skeleton.bone(HumanoidBone::LeftHand).unwrap().rotation;
        assert!(wrist.angle_between(Quat::IDENTITY) > 1e-4);
        let index_distal = skeleton.bone(HumanoidBone::LeftIndexDistal).unwrap().rotation;
        assert!(index_distal.angle_between(Quat::IDENTITY) > 1e-4);

        // The right hand had no solve and stays put
        assert_eq!(
            skeleton.bone(HumanoidBone::RightHand).unwrap().rotation,
            Quat::IDENTITY
        );
    }

    #[test]
    fn test_interpretation_failure_mutates_nothing() {
        let retargeter = retargeter();
        let mut skeleton = HumanoidSkeleton::full();
        let mut weights = ExpressionWeights::default();
        let mut state = SmoothingState::new();

        // Warm up with a valid frame so there is real state to protect
        let valid = SolveResult {
            pose: Some(pose_solve()),
            face: Some(face_solve()),
            ..Default::default()
        };
        retargeter.retarget(&mut skeleton, &mut weights, &mut state, &valid);

        let bones_before = snapshot(&skeleton);
        let weights_before = weights;
        let state_before = state;
        let look_at_before = skeleton.look_at_target();

        // Valid pose and face, but one NaN buried in a hand solve
        let mut bad_hand = HandSolve::default();
        bad_hand.fingers[2][1][0] = f32::NAN;
        let bad = SolveResult {
            pose: Some(pose_solve()),
            face: Some(face_solve()),
            right_hand: Some(bad_hand),
            ..Default::default()
        };

        let outcome = retargeter.retarget(&mut skeleton, &mut weights, &mut state, &bad);
        assert_eq!(outcome, FrameOutcome::Lost);

        assert_eq!(snapshot(&skeleton), bones_before);
        assert_eq!(weights, weights_before);
        assert_eq!(state, state_before);
        assert_eq!(skeleton.look_at_target(), look_at_before);
    }

    #[test]
    fn test_tracking_resumes_after_lost_frame() {
        let retargeter = retargeter();
        let mut skeleton = HumanoidSkeleton::full();
        let mut weights = ExpressionWeights::default();
        let mut state = SmoothingState::new();

        let mut bad_face = face_solve();
        bad_face.pupil[1] = f32::INFINITY;
        let bad = SolveResult {
            face: Some(bad_face),
            ..Default::default()
        };
        assert_eq!(
            retargeter.retarget(&mut skeleton, &mut weights, &mut state, &bad),
            FrameOutcome::Lost
        );

        let good = SolveResult {
            face: Some(face_solve()),
            ..Default::default()
        };
        assert_eq!(
            retargeter.retarget(&mut skeleton, &mut weights, &mut state, &good),
            FrameOutcome::Tracking
        );
        assert!(weights.viseme(Viseme::Aa) > 0.0);
    }

    #[test]
    fn test_empty_solve_is_tracking_noop() {
        let retargeter = retargeter();
        let mut skeleton = HumanoidSkeleton::full();
        let mut weights = ExpressionWeights::default();
        let mut state = SmoothingState::new();

        let before = snapshot(&skeleton);
        let outcome =
            retargeter.retarget(&mut skeleton, &mut weights, &mut state, &SolveResult::default());

        // All regions absent is normal: nothing moves, tracking continues
        assert!(outcome.is_tracking());
        assert_eq!(snapshot(&skeleton), before);
    }

    #[test]
    fn test_partial_rig_tolerated() {
        let retargeter = retargeter();
        // Rig without finger bones
        let mut skeleton =
            HumanoidSkeleton::bind(HumanoidBone::ALL.into_iter().filter(|b| !b.is_hand()));
        let mut weights = ExpressionWeights::default();
        let mut state = SmoothingState::new();

        let solve = SolveResult {
            pose: Some(pose_solve()),
            face: Some(face_solve()),
            left_hand: Some(HandSolve::default()),
            right_hand: Some(HandSolve::default()),
            ..Default::default()
        };

        let outcome = retargeter.retarget(&mut skeleton, &mut weights, &mut state, &solve);
        assert!(outcome.is_tracking());
        // Torso still driven despite the missing hand bones
        let spine = skeleton.bone(HumanoidBone::Spine).unwrap().rotation;
        assert!(spine.angle_between(Quat::IDENTITY) > 1e-4);
    }
}
