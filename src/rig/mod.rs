//! Humanoid rig model
//!
//! Bone vocabulary, the mutable skeleton owned by an avatar, and the damped
//! rotation/position appliers that everything upstream drives it through.

pub mod apply;
pub mod bones;
pub mod skeleton;

pub use apply::{place_toward, rotate_toward};
pub use bones::{Finger, FingerSegment, HumanoidBone, Side};
pub use skeleton::{BoneTransform, HumanoidSkeleton};
