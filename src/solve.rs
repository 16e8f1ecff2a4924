//! Per-frame solve results from the external landmark solver.
//!
//! One `SolveResult` arrives per tracked video frame as JSON over UDP. Every
//! sub-result is optional: the solver drops a region whenever it loses
//! tracking for it, and absence is not an error. Angles are Euler triples in
//! radians, wire-typed as plain arrays and converted to glam at the
//! retargeting boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rig::{Finger, FingerSegment, Side};

/// An Euler rotation as it appears on the wire: [x, y, z] radians.
pub type EulerTriple = [f32; 3];

/// Why a frame could not be interpreted.
///
/// Never escapes the retargeting core; the orchestrator turns it into a
/// dropped frame.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error("non-finite value in {0} solve")]
    NonFinite(&'static str),
}

/// One frame's worth of solver output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveResult {
    /// Torso and limb solve, if the body was tracked this frame
    #[serde(default)]
    pub pose: Option<PoseSolve>,
    /// Face solve, if the face was tracked this frame
    #[serde(default)]
    pub face: Option<FaceSolve>,
    /// Left-hand finger solve
    #[serde(default)]
    pub left_hand: Option<HandSolve>,
    /// Right-hand finger solve
    #[serde(default)]
    pub right_hand: Option<HandSolve>,
}

impl SolveResult {
    /// The hand solve for one side, if present.
    pub fn hand(&self, side: Side) -> Option<&HandSolve> {
        match side {
            Side::Left => self.left_hand.as_ref(),
            Side::Right => self.right_hand.as_ref(),
        }
    }

    /// Check every numeric field for finiteness.
    ///
    /// A NaN or infinity anywhere means the solver produced garbage for this
    /// frame; the whole frame must be dropped before any mutation happens.
    pub fn validate(&self) -> Result<(), SolveError> {
        if let Some(pose) = &self.pose {
            pose.validate()?;
        }
        if let Some(face) = &self.face {
            face.validate()?;
        }
        for hand in [&self.left_hand, &self.right_hand].into_iter().flatten() {
            hand.validate()?;
        }
        Ok(())
    }
}

/// Torso and limb targets from the body-pose solver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseSolve {
    pub hips_rotation: EulerTriple,
    /// Hip placement target (solver space)
    pub hips_position: [f32; 3],
    /// Whether `hips_position` is expressed in world space
    pub world_space: bool,
    pub spine: EulerTriple,
    pub left_upper_arm: EulerTriple,
    pub left_lower_arm: EulerTriple,
    pub right_upper_arm: EulerTriple,
    pub right_lower_arm: EulerTriple,
    pub left_upper_leg: EulerTriple,
    pub left_lower_leg: EulerTriple,
    pub right_upper_leg: EulerTriple,
    pub right_lower_leg: EulerTriple,
    /// Wrist orientation as seen by the body solver (used for its z axis)
    pub left_hand: EulerTriple,
    pub right_hand: EulerTriple,
}

impl PoseSolve {
    /// Wrist euler for one side as seen by the body solver.
    pub fn hand(&self, side: Side) -> EulerTriple {
        match side {
            Side::Left => self.left_hand,
            Side::Right => self.right_hand,
        }
    }

    fn validate(&self) -> Result<(), SolveError> {
        let triples = [
            self.hips_rotation,
            self.hips_position,
            self.spine,
            self.left_upper_arm,
            self.left_lower_arm,
            self.right_upper_arm,
            self.right_lower_arm,
            self.left_upper_leg,
            self.left_lower_leg,
            self.right_upper_leg,
            self.right_lower_leg,
            self.left_hand,
            self.right_hand,
        ];
        if triples.iter().flatten().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(SolveError::NonFinite("pose"))
        }
    }
}

/// Face solve: head orientation, eyes, and mouth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceSolve {
    /// Head rotation [pitch, yaw, roll] in radians
    pub head_rotation: EulerTriple,
    /// Eye openness, 0 = closed, 1 = open
    pub eye_open_left: f32,
    pub eye_open_right: f32,
    /// Pupil offset from center, [x, y] in solver units
    pub pupil: [f32; 2],
    /// Canonical viseme weights
    pub mouth: MouthShapes,
    /// Overall mouth-open scalar
    pub mouth_open: f32,
    /// Mouth-smile scalar
    pub mouth_smile: f32,
}

impl FaceSolve {
    fn validate(&self) -> Result<(), SolveError> {
        let scalars = [
            self.eye_open_left,
            self.eye_open_right,
            self.mouth_open,
            self.mouth_smile,
        ];
        let finite = self.head_rotation.iter().all(|v| v.is_finite())
            && self.pupil.iter().all(|v| v.is_finite())
            && scalars.iter().all(|v| v.is_finite())
            && self.mouth.weights().iter().all(|v| v.is_finite());
        if finite {
            Ok(())
        } else {
            Err(SolveError::NonFinite("face"))
        }
    }
}

/// Weights for the five canonical mouth shapes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MouthShapes {
    pub aa: f32,
    pub ih: f32,
    pub ou: f32,
    pub ee: f32,
    pub oh: f32,
}

impl MouthShapes {
    /// Weights in canonical viseme order (aa, ih, ou, ee, oh).
    pub fn weights(&self) -> [f32; 5] {
        [self.aa, self.ih, self.ou, self.ee, self.oh]
    }
}

/// Finger and wrist targets from the hand-landmark solver.
///
/// Finger rotations are indexed [finger][segment] in the order thumb, index,
/// middle, ring, little × proximal, intermediate, distal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandSolve {
    pub wrist: EulerTriple,
    pub fingers: [[EulerTriple; 3]; 5],
}

impl HandSolve {
    /// Rotation target for one finger segment.
    pub fn finger(&self, finger: Finger, segment: FingerSegment) -> EulerTriple {
        self.fingers[finger as usize][segment as usize]
    }

    fn validate(&self) -> Result<(), SolveError> {
        let finite = self.wrist.iter().all(|v| v.is_finite())
            && self
                .fingers
                .iter()
                .flatten()
                .flatten()
                .all(|v| v.is_finite());
        if finite {
            Ok(())
        } else {
            Err(SolveError::NonFinite("hand"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_face_only_packet() {
        let json = serde_json::json!({
            "face": {
                "head_rotation": [0.1, -0.05, 0.0],
                "eye_open_left": 0.9,
                "eye_open_right": 0.85,
                "pupil": [0.1, -0.2],
                "mouth": { "aa": 0.4, "ih": 0.1, "ou": 0.0, "ee": 0.2, "oh": 0.05 },
                "mouth_open": 0.5,
                "mouth_smile": 0.3
            }
        })
        .to_string();

        let result: SolveResult = serde_json::from_str(&json).unwrap();
        assert!(result.pose.is_none());
        assert!(result.left_hand.is_none());
        assert!(result.right_hand.is_none());

        let face = result.face.unwrap();
        assert!((face.head_rotation[0] - 0.1).abs() < 1e-6);
        assert!((face.mouth.aa - 0.4).abs() < 1e-6);
        assert!((face.mouth_smile - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_parse_empty_packet() {
        let result: SolveResult = serde_json::from_str("{}").unwrap();
        assert!(result.pose.is_none());
        assert!(result.face.is_none());
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_hand_accessor_by_side() {
        let result = SolveResult {
            left_hand: Some(HandSolve::default()),
            ..Default::default()
        };
        assert!(result.hand(Side::Left).is_some());
        assert!(result.hand(Side::Right).is_none());
    }

    #[test]
    fn test_finger_indexing() {
        let mut hand = HandSolve::default();
        hand.fingers[Finger::Index as usize][FingerSegment::Distal as usize] = [0.0, 0.0, 0.7];
        let euler = hand.finger(Finger::Index, FingerSegment::Distal);
        assert!((euler[2] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut face = FaceSolve::default();
        face.pupil[0] = f32::NAN;
        let result = SolveResult {
            face: Some(face),
            ..Default::default()
        };
        assert_eq!(result.validate(), Err(SolveError::NonFinite("face")));
    }

    #[test]
    fn test_validate_rejects_infinite_finger() {
        let mut hand = HandSolve::default();
        hand.fingers[4][2][1] = f32::INFINITY;
        let result = SolveResult {
            right_hand: Some(hand),
            ..Default::default()
        };
        assert_eq!(result.validate(), Err(SolveError::NonFinite("hand")));
    }
}
