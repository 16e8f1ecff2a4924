//! Kagami - Motion-capture retargeting core for humanoid avatars
//!
//! Converts per-frame pose/face/hand solve results from an external landmark
//! solver into smoothed transforms on a named skeletal rig and a blended set
//! of facial expression weights:
//! - Per-bone rotation/position damping driven by a declarative table
//! - Gaze-direction temporal smoothing with recurrent state
//! - Viseme blending and head-yaw-stabilized blink
//! - Frame-level failure containment: a frame either lands in full or is
//!   invisible to the rig
//!
//! Camera capture, the solver itself, avatar asset parsing, and rendering
//! are external collaborators. The solver feeds JSON solve results over UDP
//! (see [`tracking`]); the renderer reads the session's avatar once per
//! display frame.

pub mod avatar;
pub mod config;
pub mod error;
pub mod retarget;
pub mod rig;
pub mod session;
pub mod solve;
pub mod tracking;

pub use avatar::Avatar;
pub use config::Config;
pub use error::{KagamiError, Result};
pub use retarget::{FrameOutcome, Retargeter, SmoothingState};
pub use rig::{HumanoidBone, HumanoidSkeleton};
pub use session::Session;
pub use solve::SolveResult;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
