//! Declarative damping table for torso and limb bones.
//!
//! One entry per pose-driven bone: which solve field feeds it, how hard the
//! target is damped, and how fast the bone blends toward it. The orchestrator
//! iterates this table instead of spelling out one call per bone.

use crate::rig::HumanoidBone;
use crate::solve::{EulerTriple, PoseSolve};

use super::constants::{
    CHEST_DAMPENER, DEFAULT_BLEND, DEFAULT_DAMPENER, HIPS_ROTATION_DAMPENER, SPINE_DAMPENER,
};

/// One row of the damping policy.
pub struct DampingEntry {
    /// Bone the rotation is applied to
    pub bone: HumanoidBone,
    /// Accessor pulling this bone's raw Euler target out of the pose solve
    pub source: fn(&PoseSolve) -> EulerTriple,
    /// Scalar shrinking the raw target before blending
    pub dampener: f32,
    /// Per-call slerp factor
    pub blend: f32,
}

/// Rotation wiring for every pose-solve-driven bone.
///
/// Chest and spine share the spine solve at different dampeners so the torso
/// bends as a chain rather than hinging at one joint.
pub const POSE_ROTATIONS: &[DampingEntry] = &[
    DampingEntry {
        bone: HumanoidBone::Hips,
        source: |p| p.hips_rotation,
        dampener: HIPS_ROTATION_DAMPENER,
        blend: DEFAULT_BLEND,
    },
    DampingEntry {
        bone: HumanoidBone::Chest,
        source: |p| p.spine,
        dampener: CHEST_DAMPENER,
        blend: DEFAULT_BLEND,
    },
    DampingEntry {
        bone: HumanoidBone::Spine,
        source: |p| p.spine,
        dampener: SPINE_DAMPENER,
        blend: DEFAULT_BLEND,
    },
    DampingEntry {
        bone: HumanoidBone::LeftUpperArm,
        source: |p| p.left_upper_arm,
        dampener: DEFAULT_DAMPENER,
        blend: DEFAULT_BLEND,
    },
    DampingEntry {
        bone: HumanoidBone::LeftLowerArm,
        source: |p| p.left_lower_arm,
        dampener: DEFAULT_DAMPENER,
        blend: DEFAULT_BLEND,
    },
    DampingEntry {
        bone: HumanoidBone::RightUpperArm,
        source: |p| p.right_upper_arm,
        dampener: DEFAULT_DAMPENER,
        blend: DEFAULT_BLEND,
    },
    DampingEntry {
        bone: HumanoidBone::RightLowerArm,
        source: |p| p.right_lower_arm,
        dampener: DEFAULT_DAMPENER,
        blend: DEFAULT_BLEND,
    },
    DampingEntry {
        bone: HumanoidBone::LeftUpperLeg,
        source: |p| p.left_upper_leg,
        dampener: DEFAULT_DAMPENER,
        blend: DEFAULT_BLEND,
    },
    DampingEntry {
        bone: HumanoidBone::LeftLowerLeg,
        source: |p| p.left_lower_leg,
        dampener: DEFAULT_DAMPENER,
        blend: DEFAULT_BLEND,
    },
    DampingEntry {
        bone: HumanoidBone::RightUpperLeg,
        source: |p| p.right_upper_leg,
        dampener: DEFAULT_DAMPENER,
        blend: DEFAULT_BLEND,
    },
    DampingEntry {
        bone: HumanoidBone::RightLowerLeg,
        source: |p| p.right_lower_leg,
        dampener: DEFAULT_DAMPENER,
        blend: DEFAULT_BLEND,
    },
];
