//! Humanoid bone vocabulary.
//!
//! VRM-style camelCase names are the interchange format with rig loaders;
//! internally everything is keyed by the `HumanoidBone` enum.

/// Body side, used for arms, legs, hands, and fingers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// One of the five fingers, in canonical solver order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Little = 4,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Little,
    ];
}

/// Finger segment, proximal to distal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerSegment {
    Proximal = 0,
    Intermediate = 1,
    Distal = 2,
}

impl FingerSegment {
    pub const ALL: [FingerSegment; 3] = [
        FingerSegment::Proximal,
        FingerSegment::Intermediate,
        FingerSegment::Distal,
    ];
}

/// A named joint of the humanoid rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HumanoidBone {
    Hips,
    Spine,
    Chest,
    Neck,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftUpperLeg,
    LeftLowerLeg,
    RightUpperLeg,
    RightLowerLeg,
    LeftThumbProximal,
    LeftThumbIntermediate,
    LeftThumbDistal,
    LeftIndexProximal,
    LeftIndexIntermediate,
    LeftIndexDistal,
    LeftMiddleProximal,
    LeftMiddleIntermediate,
    LeftMiddleDistal,
    LeftRingProximal,
    LeftRingIntermediate,
    LeftRingDistal,
    LeftLittleProximal,
    LeftLittleIntermediate,
    LeftLittleDistal,
    RightThumbProximal,
    RightThumbIntermediate,
    RightThumbDistal,
    RightIndexProximal,
    RightIndexIntermediate,
    RightIndexDistal,
    RightMiddleProximal,
    RightMiddleIntermediate,
    RightMiddleDistal,
    RightRingProximal,
    RightRingIntermediate,
    RightRingDistal,
    RightLittleProximal,
    RightLittleIntermediate,
    RightLittleDistal,
}

impl HumanoidBone {
    /// Every bone the retargeter knows about.
    pub const ALL: [HumanoidBone; 44] = [
        HumanoidBone::Hips,
        HumanoidBone::Spine,
        HumanoidBone::Chest,
        HumanoidBone::Neck,
        HumanoidBone::LeftUpperArm,
        HumanoidBone::LeftLowerArm,
        HumanoidBone::LeftHand,
        HumanoidBone::RightUpperArm,
        HumanoidBone::RightLowerArm,
        HumanoidBone::RightHand,
        HumanoidBone::LeftUpperLeg,
        HumanoidBone::LeftLowerLeg,
        HumanoidBone::RightUpperLeg,
        HumanoidBone::RightLowerLeg,
        HumanoidBone::LeftThumbProximal,
        HumanoidBone::LeftThumbIntermediate,
        HumanoidBone::LeftThumbDistal,
        HumanoidBone::LeftIndexProximal,
        HumanoidBone::LeftIndexIntermediate,
        HumanoidBone::LeftIndexDistal,
        HumanoidBone::LeftMiddleProximal,
        HumanoidBone::LeftMiddleIntermediate,
        HumanoidBone::LeftMiddleDistal,
        HumanoidBone::LeftRingProximal,
        HumanoidBone::LeftRingIntermediate,
        HumanoidBone::LeftRingDistal,
        HumanoidBone::LeftLittleProximal,
        HumanoidBone::LeftLittleIntermediate,
        HumanoidBone::LeftLittleDistal,
        HumanoidBone::RightThumbProximal,
        HumanoidBone::RightThumbIntermediate,
        HumanoidBone::RightThumbDistal,
        HumanoidBone::RightIndexProximal,
        HumanoidBone::RightIndexIntermediate,
        HumanoidBone::RightIndexDistal,
        HumanoidBone::RightMiddleProximal,
        HumanoidBone::RightMiddleIntermediate,
        HumanoidBone::RightMiddleDistal,
        HumanoidBone::RightRingProximal,
        HumanoidBone::RightRingIntermediate,
        HumanoidBone::RightRingDistal,
        HumanoidBone::RightLittleProximal,
        HumanoidBone::RightLittleIntermediate,
        HumanoidBone::RightLittleDistal,
    ];

    /// VRM-style bone name, e.g. `leftThumbProximal`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HumanoidBone::Hips => "hips",
            HumanoidBone::Spine => "spine",
            HumanoidBone::Chest => "chest",
            HumanoidBone::Neck => "neck",
            HumanoidBone::LeftUpperArm => "leftUpperArm",
            HumanoidBone::LeftLowerArm => "leftLowerArm",
            HumanoidBone::LeftHand => "leftHand",
            HumanoidBone::RightUpperArm => "rightUpperArm",
            HumanoidBone::RightLowerArm => "rightLowerArm",
            HumanoidBone::RightHand => "rightHand",
            HumanoidBone::LeftUpperLeg => "leftUpperLeg",
            HumanoidBone::LeftLowerLeg => "leftLowerLeg",
            HumanoidBone::RightUpperLeg => "rightUpperLeg",
            HumanoidBone::RightLowerLeg => "rightLowerLeg",
            HumanoidBone::LeftThumbProximal => "leftThumbProximal",
            HumanoidBone::LeftThumbIntermediate => "leftThumbIntermediate",
            HumanoidBone::LeftThumbDistal => "leftThumbDistal",
            HumanoidBone::LeftIndexProximal => "leftIndexProximal",
            HumanoidBone::LeftIndexIntermediate => "leftIndexIntermediate",
            HumanoidBone::LeftIndexDistal => "leftIndexDistal",
            HumanoidBone::LeftMiddleProximal => "leftMiddleProximal",
            HumanoidBone::LeftMiddleIntermediate => "leftMiddleIntermediate",
            HumanoidBone::LeftMiddleDistal => "leftMiddleDistal",
            HumanoidBone::LeftRingProximal => "leftRingProximal",
            HumanoidBone::LeftRingIntermediate => "leftRingIntermediate",
            HumanoidBone::LeftRingDistal => "leftRingDistal",
            HumanoidBone::LeftLittleProximal => "leftLittleProximal",
            HumanoidBone::LeftLittleIntermediate => "leftLittleIntermediate",
            HumanoidBone::LeftLittleDistal => "leftLittleDistal",
            HumanoidBone::RightThumbProximal => "rightThumbProximal",
            HumanoidBone::RightThumbIntermediate => "rightThumbIntermediate",
            HumanoidBone::RightThumbDistal => "rightThumbDistal",
            HumanoidBone::RightIndexProximal => "rightIndexProximal",
            HumanoidBone::RightIndexIntermediate => "rightIndexIntermediate",
            HumanoidBone::RightIndexDistal => "rightIndexDistal",
            HumanoidBone::RightMiddleProximal => "rightMiddleProximal",
            HumanoidBone::RightMiddleIntermediate => "rightMiddleIntermediate",
            HumanoidBone::RightMiddleDistal => "rightMiddleDistal",
            HumanoidBone::RightRingProximal => "rightRingProximal",
            HumanoidBone::RightRingIntermediate => "rightRingIntermediate",
            HumanoidBone::RightRingDistal => "rightRingDistal",
            HumanoidBone::RightLittleProximal => "rightLittleProximal",
            HumanoidBone::RightLittleIntermediate => "rightLittleIntermediate",
            HumanoidBone::RightLittleDistal => "rightLittleDistal",
        }
    }

    /// Look up a bone by its VRM-style name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.as_str() == name)
    }

    /// The wrist bone for one side.
    pub fn hand(side: Side) -> Self {
        match side {
            Side::Left => HumanoidBone::LeftHand,
            Side::Right => HumanoidBone::RightHand,
        }
    }

    /// The bone for one finger segment.
    pub fn finger(side: Side, finger: Finger, segment: FingerSegment) -> Self {
        use FingerSegment::*;
        use HumanoidBone::*;
        match (side, finger, segment) {
            (Side::Left, Finger::Thumb, Proximal) => LeftThumbProximal,
            (Side::Left, Finger::Thumb, Intermediate) => LeftThumbIntermediate,
            (Side::Left, Finger::Thumb, Distal) => LeftThumbDistal,
            (Side::Left, Finger::Index, Proximal) => LeftIndexProximal,
            (Side::Left, Finger::Index, Intermediate) => LeftIndexIntermediate,
            (Side::Left, Finger::Index, Distal) => LeftIndexDistal,
            (Side::Left, Finger::Middle, Proximal) => LeftMiddleProximal,
            (Side::Left, Finger::Middle, Intermediate) => LeftMiddleIntermediate,
            (Side::Left, Finger::Middle, Distal) => LeftMiddleDistal,
            (Side::Left, Finger::Ring, Proximal) => LeftRingProximal,
            (Side::Left, Finger::Ring, Intermediate) => LeftRingIntermediate,
            (Side::Left, Finger::Ring, Distal) => LeftRingDistal,
            (Side::Left, Finger::Little, Proximal) => LeftLittleProximal,
            (Side::Left, Finger::Little, Intermediate) => LeftLittleIntermediate,
            (Side::Left, Finger::Little, Distal) => LeftLittleDistal,
            (Side::Right, Finger::Thumb, Proximal) => RightThumbProximal,
            (Side::Right, Finger::Thumb, Intermediate) => RightThumbIntermediate,
            (Side::Right, Finger::Thumb, Distal) => RightThumbDistal,
            (Side::Right, Finger::Index, Proximal) => RightIndexProximal,
            (Side::Right, Finger::Index, Intermediate) => RightIndexIntermediate,
            (Side::Right, Finger::Index, Distal) => RightIndexDistal,
            (Side::Right, Finger::Middle, Proximal) => RightMiddleProximal,
            (Side::Right, Finger::Middle, Intermediate) => RightMiddleIntermediate,
            (Side::Right, Finger::Middle, Distal) => RightMiddleDistal,
            (Side::Right, Finger::Ring, Proximal) => RightRingProximal,
            (Side::Right, Finger::Ring, Intermediate) => RightRingIntermediate,
            (Side::Right, Finger::Ring, Distal) => RightRingDistal,
            (Side::Right, Finger::Little, Proximal) => RightLittleProximal,
            (Side::Right, Finger::Little, Intermediate) => RightLittleIntermediate,
            (Side::Right, Finger::Little, Distal) => RightLittleDistal,
        }
    }

    /// All fifteen finger-segment bones of one hand, with their finger and
    /// segment keys for indexing into a `HandSolve`.
    pub fn finger_segments(
        side: Side,
    ) -> impl Iterator<Item = (HumanoidBone, Finger, FingerSegment)> {
        Finger::ALL.into_iter().flat_map(move |finger| {
            FingerSegment::ALL
                .into_iter()
                .map(move |segment| (Self::finger(side, finger, segment), finger, segment))
        })
    }

    /// Whether this bone is part of a hand (wrist or finger segment).
    pub fn is_hand(&self) -> bool {
        !matches!(
            self,
            HumanoidBone::Hips
                | HumanoidBone::Spine
                | HumanoidBone::Chest
                | HumanoidBone::Neck
                | HumanoidBone::LeftUpperArm
                | HumanoidBone::LeftLowerArm
                | HumanoidBone::RightUpperArm
                | HumanoidBone::RightLowerArm
                | HumanoidBone::LeftUpperLeg
                | HumanoidBone::LeftLowerLeg
                | HumanoidBone::RightUpperLeg
                | HumanoidBone::RightLowerLeg
        )
    }
}

impl std::fmt::Display for HumanoidBone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
