//! Expression blending: visemes, blink, and mouth scalars.
//!
//! Viseme and blink weights are single-step lerped against their
//! previous-frame values so mouth shapes fade between frames instead of
//! popping. Blink additionally gets stabilized against head yaw before
//! blending: the far eye's landmarks degrade as the head turns, and the
//! resulting asymmetric "wink" signal is usually a tracking artifact.

use crate::config::RetargetTuning;
use crate::solve::FaceSolve;

use super::constants::VISEME_BLEND;

/// The five canonical mouth shapes, in solver order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viseme {
    Aa = 0,
    Ih = 1,
    Ou = 2,
    Ee = 3,
    Oh = 4,
}

impl Viseme {
    pub const ALL: [Viseme; 5] = [Viseme::Aa, Viseme::Ih, Viseme::Ou, Viseme::Ee, Viseme::Oh];

    /// VRM expression name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Viseme::Aa => "aa",
            Viseme::Ih => "ih",
            Viseme::Ou => "ou",
            Viseme::Ee => "ee",
            Viseme::Oh => "oh",
        }
    }
}

/// Previous-frame expression weights, one per avatar instance.
///
/// Same ownership and lifecycle as the gaze state: mutated only by the
/// expression blender, reset when the avatar is replaced. Unset weights fall
/// back to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpressionState {
    visemes: [f32; 5],
    blink: f32,
}

impl ExpressionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viseme(&self, viseme: Viseme) -> f32 {
        self.visemes[viseme as usize]
    }

    pub fn blink(&self) -> f32 {
        self.blink
    }

    /// Overwrite the recurrent weights with a committed frame's values.
    pub fn store(&mut self, visemes: [f32; 5], blink: f32) {
        self.visemes = visemes;
        self.blink = blink;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Blended expression weights for the renderer to read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpressionWeights {
    pub visemes: [f32; 5],
    pub blink: f32,
    pub mouth_open: f32,
    pub mouth_smile: f32,
}

impl ExpressionWeights {
    pub fn viseme(&self, viseme: Viseme) -> f32 {
        self.visemes[viseme as usize]
    }
}

/// One frame's blended expression values, computed without touching state.
pub type FacePlan = ExpressionWeights;

/// Blend this frame's face solve against the previous stored weights.
pub fn plan(state: &ExpressionState, face: &FaceSolve, tuning: &RetargetTuning) -> FacePlan {
    let raw = face.mouth.weights();
    let mut visemes = [0.0f32; 5];
    for (i, value) in visemes.iter_mut().enumerate() {
        *value = lerp(state.visemes[i], raw[i].clamp(0.0, 1.0), VISEME_BLEND);
    }

    let raw_blink = stabilized_blink(
        face.eye_open_left,
        face.eye_open_right,
        face.head_rotation[1],
        tuning.blink_yaw_suppression,
    );
    let blink = lerp(state.blink, raw_blink, VISEME_BLEND);

    FacePlan {
        visemes,
        blink,
        mouth_open: face.mouth_open.clamp(0.0, 1.0),
        mouth_smile: face.mouth_smile.clamp(0.0, 1.0),
    }
}

/// Blink weight from per-eye openness, normalized by head yaw.
///
/// The average closedness of both eyes is the blink signal; the asymmetry
/// between the eyes is discounted as head yaw grows, since a turned head
/// occludes the far eye and fakes a wink. The exact curve is a tunable —
/// the contract is only that suppression grows monotonically with |yaw|.
pub fn stabilized_blink(eye_open_left: f32, eye_open_right: f32, head_yaw: f32, gain: f32) -> f32 {
    let left = eye_open_left.clamp(0.0, 1.0);
    let right = eye_open_right.clamp(0.0, 1.0);

    let closedness = 1.0 - 0.5 * (left + right);
    let asymmetry = (left - right).abs();
    let confidence = 1.0 / (1.0 + head_yaw.abs() * gain);

    (closedness - asymmetry * 0.5 * (1.0 - confidence)).clamp(0.0, 1.0)
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
