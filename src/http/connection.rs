use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, trace};

use crate::http::frame::{FrameBuffer, INITIAL_BUFFER_SIZE, find_delimiter};

/// How long the `try_*` reads wait for the socket to become readable.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Upper bound on bytes kept between two reads.
pub const RESIDUAL_CAPACITY: usize = INITIAL_BUFFER_SIZE;

/// Errors raised by the connection layer.
#[derive(Debug, Error)]
pub enum NetError {
    /// Binding, listening or connecting failed.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The peer shut down its side before the read could complete.
    #[error("connection closed by peer")]
    Closed,

    /// Any other hard socket error.
    #[error("socket error: {0}")]
    Io(#[from] io::Error),
}

/// What the next read is after, so buffered bytes can be judged sufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Need {
    /// A complete header frame.
    Frame,
    /// Exactly this many bytes.
    Exact(usize),
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
    )
}

/// A bound socket that hands out one [`Connection`] per accepted client.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    pub async fn bind(addr: &str) -> Result<Self, NetError> {
        let inner = TcpListener::bind(addr)
            .await
            .map_err(|source| NetError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        Ok(Self { inner })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Blocks until the next client connects.
    pub async fn accept(&self) -> Result<Connection, NetError> {
        let (stream, peer) = self.inner.accept().await?;
        debug!(%peer, "accepted connection");
        Ok(Connection::new(stream, peer))
    }
}

/// One stream socket plus the bytes read past the last frame boundary.
///
/// The residual buffer only ever holds bytes that came off the socket and
/// were not handed to a caller yet, and never more than
/// [`RESIDUAL_CAPACITY`] of them.
pub struct Connection {
    stream: TcpStream,
    residual: BytesMut,
    peer: SocketAddr,
    poll_interval: Duration,
}

impl Connection {
    fn new(stream: TcpStream, peer: SocketAddr) -> Self {
        Self {
            stream,
            residual: BytesMut::with_capacity(RESIDUAL_CAPACITY),
            peer,
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Listens on `port` on all interfaces and waits for exactly one client.
    ///
    /// The listening socket is released as soon as the client is accepted.
    pub async fn open_as_server(port: u16) -> Result<Self, NetError> {
        let listener = Listener::bind(&format!("0.0.0.0:{port}")).await?;
        listener.accept().await
    }

    /// Connects to a peer that is already listening on `address:port`.
    pub async fn open_as_client(address: &str, port: u16) -> Result<Self, NetError> {
        let addr = format!("{address}:{port}");
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| NetError::Connect {
                addr: addr.clone(),
                source,
            })?;
        let peer = stream.peer_addr()?;
        debug!(%peer, "connected");
        Ok(Self::new(stream, peer))
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Changes how long the `try_*` reads wait, [`POLL_INTERVAL`] by default.
    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = interval;
    }

    /// Number of bytes waiting in the residual buffer.
    pub fn residual_len(&self) -> usize {
        self.residual.len()
    }

    /// Writes all of `bytes`, retrying on transient failures.
    pub async fn send(&mut self, bytes: &[u8]) -> Result<usize, NetError> {
        let mut written = 0;
        while written < bytes.len() {
            match self.stream.write(&bytes[written..]).await {
                Ok(0) => return Err(NetError::Closed),
                Ok(n) => written += n,
                Err(e) if is_transient(&e) => continue,
                Err(e) => return Err(NetError::Io(e)),
            }
        }
        trace!(peer = %self.peer, bytes = written, "sent");
        Ok(written)
    }

    /// Returns exactly `n` bytes, draining the residual buffer first.
    pub async fn read_exact(&mut self, n: usize) -> Result<Bytes, NetError> {
        let from_residual = n.min(self.residual.len());
        let mut out = BytesMut::with_capacity(n);
        out.extend_from_slice(&self.residual.split_to(from_residual));

        if from_residual < n {
            out.resize(n, 0);
            let mut filled = from_residual;
            while filled < n {
                match self.stream.read(&mut out[filled..]).await {
                    Ok(0) => return Err(NetError::Closed),
                    Ok(k) => filled += k,
                    Err(e) if is_transient(&e) => continue,
                    Err(e) => return Err(NetError::Io(e)),
                }
            }
        }

        Ok(out.freeze())
    }

    /// Returns the next header frame, delimiter included.
    ///
    /// Bytes that arrived after the delimiter are kept for the next read.
    pub async fn read_frame(&mut self) -> Result<Bytes, NetError> {
        let mut frame = FrameBuffer::new();
        frame.push(&self.residual.split());

        let mut chunk = vec![0u8; RESIDUAL_CAPACITY];
        loop {
            if let Some(end) = frame.find_delimiter() {
                let (head, rest) = frame.split_frame(end);
                debug_assert!(rest.len() <= RESIDUAL_CAPACITY);
                self.residual.extend_from_slice(&rest);
                trace!(peer = %self.peer, bytes = head.len(), residual = self.residual.len(), "frame read");
                return Ok(head);
            }

            let n = match self.stream.read(&mut chunk).await {
                Ok(0) => return Err(NetError::Closed),
                Ok(n) => n,
                Err(e) if is_transient(&e) => continue,
                Err(e) => return Err(NetError::Io(e)),
            };
            frame.push(&chunk[..n]);
        }
    }

    /// Whether the residual buffer alone already satisfies `need`.
    fn buffered(&self, need: Need) -> bool {
        match need {
            Need::Frame => find_delimiter(&self.residual).is_some(),
            Need::Exact(n) => self.residual.len() >= n,
        }
    }

    /// Waits until a read for `need` can make progress.
    ///
    /// Residual bytes only count when they already hold everything `need`
    /// asks for; a partial frame in the buffer still waits on the socket.
    pub async fn readable(&self, need: Need) -> Result<(), NetError> {
        if self.buffered(need) {
            return Ok(());
        }
        self.stream.readable().await?;
        Ok(())
    }

    /// Reports whether a read for `need` would find data within `timeout`.
    pub async fn poll_ready(&self, need: Need, timeout: Duration) -> Result<bool, NetError> {
        match tokio::time::timeout(timeout, self.readable(need)).await {
            Ok(ready) => ready.map(|()| true),
            Err(_elapsed) => Ok(false),
        }
    }

    /// Like [`read_frame`](Self::read_frame), but gives up with `None` when
    /// nothing arrives within the poll interval.
    ///
    /// Once data is there this blocks until the whole frame is in.
    pub async fn try_read_frame(&mut self) -> Result<Option<Bytes>, NetError> {
        if !self.poll_ready(Need::Frame, self.poll_interval).await? {
            return Ok(None);
        }
        self.read_frame().await.map(Some)
    }

    /// Like [`read_exact`](Self::read_exact), but gives up with `None` when
    /// nothing arrives within the poll interval.
    pub async fn try_read_exact(&mut self, n: usize) -> Result<Option<Bytes>, NetError> {
        if !self.poll_ready(Need::Exact(n), self.poll_interval).await? {
            return Ok(None);
        }
        self.read_exact(n).await.map(Some)
    }

    /// Shuts the socket down and releases it.
    pub async fn close(mut self) -> Result<(), NetError> {
        trace!(peer = %self.peer, "closing connection");
        self.stream.shutdown().await?;
        Ok(())
    }
}
