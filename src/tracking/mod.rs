//! Frame driver boundary
//!
//! The landmark solver runs out of process and sends one JSON solve result
//! per tracked video frame over UDP. This module receives those packets and
//! pumps them into the retargeting session.

pub mod receiver;

pub use receiver::SolveReceiver;
