//! Gaze-direction temporal smoothing.
//!
//! The pupil offset from the face solver is too noisy to drive a look-at
//! directly; a single recurrent lerp against the previous smoothed angle
//! converges geometrically toward the raw value without ever overshooting it.

use glam::{Vec2, Vec3};

use crate::config::RetargetTuning;

use super::constants::GAZE_BLEND;

/// Recurrent 2-axis gaze angle, one per avatar instance.
///
/// x follows the vertical pupil offset, y the horizontal one. Mutated only by
/// the gaze smoother; reset when the avatar is replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GazeSmoothState {
    angle: Vec2,
}

impl GazeSmoothState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The previous smoothed angle.
    pub fn angle(&self) -> Vec2 {
        self.angle
    }

    /// Overwrite the recurrent angle with a freshly smoothed value.
    pub fn store(&mut self, angle: Vec2) {
        self.angle = angle;
    }

    pub fn reset(&mut self) {
        self.angle = Vec2::ZERO;
    }
}

/// Smoothed gaze for one frame: the new recurrent angle and the projected
/// look-at point. Computed without touching any state so a failed frame can
/// be discarded wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazePlan {
    pub angle: Vec2,
    pub look_at: Vec3,
}

/// Blend the previous smoothed angle toward the raw pupil offset and project
/// the result to a look-at point ahead of the avatar's head.
pub fn plan(state: &GazeSmoothState, pupil: [f32; 2], tuning: &RetargetTuning) -> GazePlan {
    // Vertical pupil offset drives the pitch axis, horizontal the yaw axis.
    let raw = Vec2::new(pupil[1], pupil[0]);
    let angle = state.angle().lerp(raw, GAZE_BLEND);

    let d = tuning.gaze_distance;
    let look_at = Vec3::new(
        angle.y.sin() * d,
        tuning.head_height - angle.x.sin() * d,
        d,
    );

    GazePlan { angle, look_at }
}
