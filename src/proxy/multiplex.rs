//! Two-way frame forwarding between a pair of connections.

use std::convert::Infallible;
use std::future::Future;

use bytes::Bytes;
use tracing::trace;

use crate::http::connection::{Connection, NetError, Need};

/// Reacts to a frame read from one side of a [`multiplex`] pair.
pub trait FrameHandler {
    /// Called with the *other* connection of the pair and the frame that
    /// just arrived.
    fn on_frame(
        &mut self,
        peer: &mut Connection,
        frame: Bytes,
    ) -> impl Future<Output = Result<(), NetError>> + Send;
}

/// Writes every frame it sees to the peer unchanged.
#[derive(Debug, Default)]
pub struct Forward {
    frames: u64,
    bytes: u64,
}

impl Forward {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl FrameHandler for Forward {
    async fn on_frame(&mut self, peer: &mut Connection, frame: Bytes) -> Result<(), NetError> {
        let sent = peer.send(&frame).await?;
        self.frames += 1;
        self.bytes += sent as u64;
        Ok(())
    }
}

enum Side {
    Local,
    Remote,
}

/// Waits on both connections at once and hands each frame to the matching
/// handler, forever.
///
/// There is no timeout. The loop only ends when waiting, reading or a
/// handler fails; that error is returned and both connections are left to
/// the caller to close. A peer hanging up surfaces as [`NetError::Closed`].
pub async fn multiplex<L, R>(
    local: &mut Connection,
    remote: &mut Connection,
    on_local: &mut L,
    on_remote: &mut R,
) -> Result<Infallible, NetError>
where
    L: FrameHandler,
    R: FrameHandler,
{
    loop {
        let side = tokio::select! {
            ready = remote.readable(Need::Frame) => { ready?; Side::Remote }
            ready = local.readable(Need::Frame) => { ready?; Side::Local }
        };

        match side {
            Side::Remote => {
                let frame = remote.read_frame().await?;
                trace!(bytes = frame.len(), "frame from remote");
                on_remote.on_frame(local, frame).await?;
            }
            Side::Local => {
                let frame = local.read_frame().await?;
                trace!(bytes = frame.len(), "frame from local");
                on_local.on_frame(remote, frame).await?;
            }
        }
    }
}
