//! Tracking session: the single call path that mutates an avatar.
//!
//! Solve results arrive asynchronously from the frame driver; each one runs
//! the full retargeting pass to completion before the next is accepted. The
//! avatar sits behind one `RwLock` so an independently clocked render loop
//! can read the latest transforms; the retargeting task is the only writer.
//! Shutdown stops frame delivery (the channel is closed/drained) before the
//! session is torn down.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, RwLock, RwLockReadGuard};
use tracing::{debug, info};

use crate::avatar::Avatar;
use crate::retarget::FrameOutcome;
use crate::solve::SolveResult;

/// Shared state of one tracking session.
#[derive(Debug)]
pub struct Session {
    avatar: RwLock<Avatar>,
    shutdown_tx: broadcast::Sender<()>,
    frames_applied: AtomicU64,
    frames_dropped: AtomicU64,
}

impl Session {
    pub fn new(avatar: Avatar) -> Arc<Self> {
        let (shutdown_tx, _) = broadcast::channel(1);
        Arc::new(Self {
            avatar: RwLock::new(avatar),
            shutdown_tx,
            frames_applied: AtomicU64::new(0),
            frames_dropped: AtomicU64::new(0),
        })
    }

    /// Apply one solve result to the avatar.
    pub async fn apply(&self, solve: &SolveResult) -> FrameOutcome {
        let outcome = self.avatar.write().await.retarget(solve);
        match outcome {
            FrameOutcome::Tracking => {
                self.frames_applied.fetch_add(1, Ordering::Relaxed);
            }
            FrameOutcome::Lost => {
                self.frames_dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
        outcome
    }

    /// Read access for the render loop. Taken once per display frame,
    /// together with that frame's elapsed time for secondary animation.
    pub async fn avatar(&self) -> RwLockReadGuard<'_, Avatar> {
        self.avatar.read().await
    }

    /// Swap in a newly loaded rig; recurrent smoothing state is reset.
    pub async fn rebind(&self, skeleton: crate::rig::HumanoidSkeleton) {
        self.avatar.write().await.rebind(skeleton);
    }

    /// Frames applied / dropped since the session started.
    pub fn frame_counts(&self) -> (u64, u64) {
        (
            self.frames_applied.load(Ordering::Relaxed),
            self.frames_dropped.load(Ordering::Relaxed),
        )
    }

    /// Signal the session (and any receivers pumping frames into it) to stop.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Run the retargeting loop until shutdown or the frame channel closes.
    ///
    /// Shutdown is checked with priority over pending frames so no further
    /// retargeting pass starts once teardown has been requested.
    pub fn run(self: Arc<Self>, mut frames: mpsc::Receiver<SolveResult>) -> tokio::task::JoinHandle<()> {
        let mut shutdown = self.subscribe_shutdown();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.recv() => {
                        frames.close();
                        break;
                    }
                    frame = frames.recv() => {
                        match frame {
                            Some(solve) => {
                                if self.apply(&solve).await == FrameOutcome::Lost {
                                    debug!("solve frame dropped");
                                }
                            }
                            None => break,
                        }
                    }
                }
            }

            let (applied, dropped) = self.frame_counts();
            info!("tracking session ended: {applied} frames applied, {dropped} dropped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetargetTuning;
    use crate::retarget::Viseme;
    use crate::rig::HumanoidSkeleton;
    use crate::solve::{FaceSolve, MouthShapes};

    fn session() -> Arc<Session> {
        Session::new(Avatar::new(
            HumanoidSkeleton::full(),
            RetargetTuning::default(),
        ))
    }

    fn face_frame() -> SolveResult {
        SolveResult {
            face: Some(FaceSolve {
                eye_open_left: 1.0,
                eye_open_right: 1.0,
                mouth: MouthShapes {
                    aa: 1.0,
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_apply_counts_frames() {
        let session = session();

        assert_eq!(session.apply(&face_frame()).await, FrameOutcome::Tracking);

        let mut bad = face_frame();
        bad.face.as_mut().unwrap().pupil[0] = f32::NAN;
        assert_eq!(session.apply(&bad).await, FrameOutcome::Lost);

        assert_eq!(session.frame_counts(), (1, 1));
    }

    #[tokio::test]
    async fn test_run_consumes_channel_until_close() {
        let session = session();
        let (tx, rx) = mpsc::channel(8);
        let handle = session.clone().run(rx);

        tx.send(face_frame()).await.unwrap();
        tx.send(face_frame()).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        assert_eq!(session.frame_counts(), (2, 0));
        let avatar = session.avatar().await;
        assert!((avatar.expression_weights().viseme(Viseme::Aa) - 0.75).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_shutdown_stops_frame_delivery() {
        let session = session();
        let (tx, rx) = mpsc::channel(8);
        let handle = session.clone().run(rx);

        session.shutdown();
        handle.await.unwrap();

        // Channel closed by the session; sends now fail and nothing applies
        assert!(tx.send(face_frame()).await.is_err());
        assert_eq!(session.frame_counts(), (0, 0));
    }
}
