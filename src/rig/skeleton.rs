//! Mutable humanoid skeleton owned by an avatar instance.

use glam::{Quat, Vec3};
use std::collections::HashMap;

use super::bones::HumanoidBone;

/// Local transform of one bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneTransform {
    /// Local rotation. Kept unit-length after every mutation.
    pub rotation: Quat,
    /// Local position
    pub position: Vec3,
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
        }
    }
}

/// The named-bone skeleton of one loaded avatar.
///
/// Built from whatever set of bones the avatar's rig actually binds; rigs
/// without optional bones (fingers, chest) are normal and lookups for those
/// bones return `None`. Created when an avatar asset is loaded, mutated every
/// retargeting call, replaced wholesale when a new avatar is loaded.
#[derive(Debug, Clone)]
pub struct HumanoidSkeleton {
    bones: HashMap<HumanoidBone, BoneTransform>,
    /// Point the rig's look-at system tracks, in world space
    look_at_target: Vec3,
}

impl HumanoidSkeleton {
    /// Bind a skeleton over the given set of rig bones, all at rest.
    pub fn bind(bones: impl IntoIterator<Item = HumanoidBone>) -> Self {
        Self {
            bones: bones
                .into_iter()
                .map(|b| (b, BoneTransform::default()))
                .collect(),
            look_at_target: Vec3::ZERO,
        }
    }

    /// A skeleton binding every bone the retargeter knows about.
    pub fn full() -> Self {
        Self::bind(HumanoidBone::ALL)
    }

    /// Whether the rig binds this bone.
    pub fn has_bone(&self, bone: HumanoidBone) -> bool {
        self.bones.contains_key(&bone)
    }

    /// Current transform of a bone, if the rig binds it.
    pub fn bone(&self, bone: HumanoidBone) -> Option<&BoneTransform> {
        self.bones.get(&bone)
    }

    /// Mutable transform of a bone, if the rig binds it.
    pub fn bone_mut(&mut self, bone: HumanoidBone) -> Option<&mut BoneTransform> {
        self.bones.get_mut(&bone)
    }

    /// Number of bound bones.
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Iterate over all bound bones and their transforms.
    pub fn iter(&self) -> impl Iterator<Item = (HumanoidBone, &BoneTransform)> {
        self.bones.iter().map(|(b, t)| (*b, t))
    }

    /// The point the rig's look-at system currently tracks.
    pub fn look_at_target(&self) -> Vec3 {
        self.look_at_target
    }

    /// Move the look-at target.
    pub fn set_look_at_target(&mut self, target: Vec3) {
        self.look_at_target = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::bones::{Finger, FingerSegment, Side};

    #[test]
    fn test_full_skeleton_binds_everything() {
        let skeleton = HumanoidSkeleton::full();
        assert_eq!(skeleton.bone_count(), HumanoidBone::ALL.len());
        for bone in HumanoidBone::ALL {
            assert!(skeleton.has_bone(bone), "missing {bone}");
        }
    }

    #[test]
    fn test_partial_rig_missing_bones() {
        // A rig without finger bones, like many low-poly models
        let skeleton =
            HumanoidSkeleton::bind(HumanoidBone::ALL.into_iter().filter(|b| !b.is_hand()));

        assert!(skeleton.has_bone(HumanoidBone::Hips));
        assert!(!skeleton.has_bone(HumanoidBone::LeftHand));
        assert!(!skeleton.has_bone(HumanoidBone::finger(
            Side::Right,
            Finger::Index,
            FingerSegment::Distal
        )));
        assert!(skeleton
            .bone(HumanoidBone::LeftThumbProximal)
            .is_none());
    }

    #[test]
    fn test_bones_start_at_rest() {
        let skeleton = HumanoidSkeleton::full();
        let hips = skeleton.bone(HumanoidBone::Hips).unwrap();
        assert_eq!(hips.rotation, Quat::IDENTITY);
        assert_eq!(hips.position, Vec3::ZERO);
    }
}
