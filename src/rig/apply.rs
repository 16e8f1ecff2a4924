//! Damped rotation/position appliers.
//!
//! The raw solver target is first shrunk by a dampener, then the bone's
//! current transform is blended toward it. Blending (rather than snapping)
//! is what hides per-frame solver jitter at camera frame rate.

use glam::{EulerRot, Quat, Vec3};

use super::bones::HumanoidBone;
use super::skeleton::HumanoidSkeleton;

/// Convert a raw Euler target (radians) into a damped unit quaternion.
///
/// Each component is scaled by the dampener before conversion, limiting the
/// maximum excursion a single solve can command.
pub fn damped_rotation(euler_rad: [f32; 3], dampener: f32) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        euler_rad[0] * dampener,
        euler_rad[1] * dampener,
        euler_rad[2] * dampener,
    )
    .normalize()
}

/// Spherically blend a bone's rotation toward a damped Euler target.
///
/// No-op if the rig does not bind the bone; a tracked body part without a
/// matching rig bone is expected, not an error. Blend 0 leaves the bone
/// untouched, blend 1 snaps it to the damped target.
pub fn rotate_toward(
    skeleton: &mut HumanoidSkeleton,
    bone: HumanoidBone,
    euler_rad: [f32; 3],
    dampener: f32,
    blend: f32,
) {
    let target = damped_rotation(euler_rad, dampener);
    rotate_toward_quat(skeleton, bone, target, blend);
}

/// Like [`rotate_toward`] but with a precomputed target quaternion.
pub fn rotate_toward_quat(
    skeleton: &mut HumanoidSkeleton,
    bone: HumanoidBone,
    target: Quat,
    blend: f32,
) {
    let Some(transform) = skeleton.bone_mut(bone) else {
        return;
    };
    let blend = blend.clamp(0.0, 1.0);
    transform.rotation = transform.rotation.slerp(target, blend).normalize();
}

/// Linearly blend a bone's position toward a damped target.
///
/// Only root-like bones (hips) are placed absolutely; everything else is
/// rotation-driven. Same no-op rule as [`rotate_toward`].
pub fn place_toward(
    skeleton: &mut HumanoidSkeleton,
    bone: HumanoidBone,
    position: Vec3,
    dampener: f32,
    blend: f32,
) {
    let Some(transform) = skeleton.bone_mut(bone) else {
        return;
    };
    let blend = blend.clamp(0.0, 1.0);
    transform.position = transform.position.lerp(position * dampener, blend);
}
