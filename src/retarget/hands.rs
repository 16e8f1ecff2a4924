//! Hand retargeting: wrist + fifteen finger-segment bones per side.
//!
//! The finger-landmark solver has no stable view of the wrist's roll, and the
//! body solver has no view of the fingers, so the wrist target is composed
//! from both: z axis from the pose solve, x/y axes from the hand solve. A
//! hand is only rigged when both inputs are present for its side this frame;
//! applying finger rotations against a stale wrist basis twists the hand into
//! knots, so partial data is skipped outright.

use crate::rig::{HumanoidBone, Side};
use crate::solve::{HandSolve, PoseSolve};

use super::constants::{DEFAULT_BLEND, DEFAULT_DAMPENER};
use super::RotationOp;

/// Plan the wrist and finger rotations for one side.
pub fn plan(side: Side, pose: &PoseSolve, hand: &HandSolve, ops: &mut Vec<RotationOp>) {
    let pose_wrist = pose.hand(side);
    let wrist = [hand.wrist[0], hand.wrist[1], pose_wrist[2]];
    ops.push(RotationOp::from_euler(
        HumanoidBone::hand(side),
        wrist,
        DEFAULT_DAMPENER,
        DEFAULT_BLEND,
    ));

    for (bone, finger, segment) in HumanoidBone::finger_segments(side) {
        ops.push(RotationOp::from_euler(
            bone,
            hand.finger(finger, segment),
            DEFAULT_DAMPENER,
            DEFAULT_BLEND,
        ));
    }
}
