//! Solve-result receiver (JSON over UDP).

use std::net::UdpSocket;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::config::ReceiverConfig;
use crate::error::{KagamiError, TrackingError};
use crate::solve::SolveResult;

/// Receives solve-result packets from the external solver process.
pub struct SolveReceiver {
    config: ReceiverConfig,
    socket: Option<UdpSocket>,
}

impl SolveReceiver {
    /// Create a new receiver (does not bind yet).
    pub fn new(config: &ReceiverConfig) -> Self {
        Self {
            config: config.clone(),
            socket: None,
        }
    }

    /// Bind the UDP socket.
    pub fn start(&mut self) -> Result<(), KagamiError> {
        let addr = format!("{}:{}", self.config.listen_address, self.config.port);

        let socket = UdpSocket::bind(&addr).map_err(|e| {
            TrackingError::Receiver(format!("Failed to bind to {}: {}", addr, e))
        })?;

        socket.set_nonblocking(true).map_err(|e| {
            TrackingError::Receiver(format!("Failed to set non-blocking: {}", e))
        })?;

        info!("Solve receiver listening on {}", addr);
        self.socket = Some(socket);

        Ok(())
    }

    /// The bound local address, once started.
    pub fn local_addr(&self) -> Option<std::net::SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }

    /// Try to read one packet (non-blocking).
    ///
    /// Returns `Ok(None)` when no packet is waiting or the receiver is not
    /// started. A malformed packet is a recoverable parse error; the caller
    /// logs it and keeps going.
    pub fn poll(&self) -> Result<Option<SolveResult>, KagamiError> {
        let socket = match &self.socket {
            Some(s) => s,
            None => return Ok(None),
        };

        let mut buf = [0u8; 65536];

        match socket.recv(&mut buf) {
            Ok(size) if size > 0 => {
                let solve: SolveResult = serde_json::from_slice(&buf[..size])
                    .map_err(|e| TrackingError::Parse(format!("JSON parse error: {}", e)))?;
                Ok(Some(solve))
            }
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(TrackingError::Receiver(format!("Receive error: {}", e)).into()),
        }
    }

    /// Stop the receiver and release the socket.
    pub fn stop(&mut self) {
        self.socket = None;
        info!("Solve receiver stopped");
    }

    /// Pump packets into the session's frame channel until shutdown.
    ///
    /// Parse failures are logged and skipped — a corrupt packet from the
    /// solver must not end the session.
    pub async fn run(
        mut self,
        frames: mpsc::Sender<SolveResult>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            if shutdown.try_recv().is_ok() {
                break;
            }

            match self.poll() {
                Ok(Some(solve)) => {
                    if frames.send(solve).await.is_err() {
                        // Session gone; nothing left to feed
                        break;
                    }
                }
                Ok(None) => {
                    tokio::time::sleep(Duration::from_millis(2)).await;
                }
                Err(KagamiError::Tracking(TrackingError::Parse(msg))) => {
                    debug!("discarding malformed solve packet: {msg}");
                }
                Err(e) => {
                    warn!("solve receiver error: {e}");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }

        self.stop();
    }
}
