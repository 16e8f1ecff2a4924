//! One loaded avatar: its skeleton, recurrent smoothing state, and the
//! expression weights the renderer reads.
//!
//! All recurrent state is owned here and threaded explicitly through each
//! retargeting call, so several avatars can be driven side by side and a
//! replaced model starts from a clean slate.

use crate::config::RetargetTuning;
use crate::retarget::{ExpressionWeights, FrameOutcome, Retargeter, SmoothingState};
use crate::rig::HumanoidSkeleton;
use crate::solve::SolveResult;

/// A drivable avatar instance.
#[derive(Debug)]
pub struct Avatar {
    skeleton: HumanoidSkeleton,
    state: SmoothingState,
    weights: ExpressionWeights,
    retargeter: Retargeter,
}

impl Avatar {
    /// Wrap a freshly loaded rig.
    pub fn new(skeleton: HumanoidSkeleton, tuning: RetargetTuning) -> Self {
        Self {
            skeleton,
            state: SmoothingState::new(),
            weights: ExpressionWeights::default(),
            retargeter: Retargeter::new(tuning),
        }
    }

    /// Apply one solve result. See [`Retargeter::retarget`] for the frame
    /// drop semantics.
    pub fn retarget(&mut self, solve: &SolveResult) -> FrameOutcome {
        self.retargeter.retarget(
            &mut self.skeleton,
            &mut self.weights,
            &mut self.state,
            solve,
        )
    }

    /// Replace the rig with a newly loaded model, clearing all recurrent
    /// smoothing state.
    pub fn rebind(&mut self, skeleton: HumanoidSkeleton) {
        self.skeleton = skeleton;
        self.state.reset();
        self.weights = ExpressionWeights::default();
        tracing::info!("avatar rebound, smoothing state reset");
    }

    /// Current skeleton transforms, for the render loop.
    pub fn skeleton(&self) -> &HumanoidSkeleton {
        &self.skeleton
    }

    /// Current blended expression weights, for the render loop.
    pub fn expression_weights(&self) -> &ExpressionWeights {
        &self.weights
    }

    /// Recurrent smoothing state (gaze angle, previous expression weights).
    pub fn smoothing_state(&self) -> &SmoothingState {
        &self.state
    }
}
