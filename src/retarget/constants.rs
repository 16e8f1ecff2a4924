//! Fixed blend constants for the retargeting pipeline.
//!
//! These are design-time values matched to the reference rig wiring, not
//! runtime configuration. Genuinely tunable knobs live in
//! [`crate::config::RetargetTuning`].

/// Dampener applied to a raw rotation target unless a table entry overrides it.
pub const DEFAULT_DAMPENER: f32 = 1.0;

/// Per-call slerp factor for bone rotations.
pub const DEFAULT_BLEND: f32 = 0.3;

/// Lerp factor for the recurrent gaze angle.
pub const GAZE_BLEND: f32 = 0.4;

/// Lerp factor for viseme and blink weights against their previous values.
pub const VISEME_BLEND: f32 = 0.5;

/// Dampener for the neck following head rotation.
pub const NECK_DAMPENER: f32 = 0.7;

/// Dampener for hips rotation.
pub const HIPS_ROTATION_DAMPENER: f32 = 0.7;

/// Chest takes a light share of the spine solve...
pub const CHEST_DAMPENER: f32 = 0.25;

/// ...and the spine bone a heavier one.
pub const SPINE_DAMPENER: f32 = 0.45;

/// Hip placement blends much slower than rotations to keep the root steady.
pub const HIPS_POSITION_BLEND: f32 = 0.07;

/// Vertical offset lifting solver hip space onto the rig's standing height.
pub const HIPS_Y_OFFSET: f32 = 1.0;
