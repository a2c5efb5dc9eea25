use std::convert::Infallible;
use std::io;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::http::connection::{Connection, Listener, NetError, POLL_INTERVAL};
use crate::http::parser::parse_frame;
use crate::http::response::{Mime, StatusCode};
use crate::http::writer::format_text;
use crate::server::router::Router;

/// Pause before retrying an accept that failed for reasons other than the
/// client going away, e.g. running out of file descriptors.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// How long to wait before the next accept after `err`.
///
/// A client that aborted or reset while queued only costs that one client,
/// so accepting resumes at once.
pub fn accept_backoff(err: &NetError) -> Duration {
    match err {
        NetError::Io(e)
            if matches!(
                e.kind(),
                io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::Interrupted
                    | io::ErrorKind::WouldBlock
            ) =>
        {
            Duration::ZERO
        }
        _ => ACCEPT_BACKOFF,
    }
}

/// Serves one client at a time: accept, read one request, answer, close.
pub struct Server {
    router: Router,
    poll_interval: Duration,
}

impl Server {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Runs the accept loop forever.
    ///
    /// A failed accept is logged and retried after [`accept_backoff`].
    pub async fn serve(&self, listener: &Listener) -> Infallible {
        loop {
            if let Err(e) = self.serve_one(listener).await {
                let backoff = accept_backoff(&e);
                warn!(error = %e, ?backoff, "accept failed");
                if !backoff.is_zero() {
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    /// Accepts a single client and handles its request.
    ///
    /// The connection is always closed before this returns, so no second
    /// client is accepted while one is still open. Only an accept failure is
    /// reported as an error; a broken client is logged and dropped.
    pub async fn serve_one(&self, listener: &Listener) -> Result<(), NetError> {
        let mut conn = listener.accept().await?;
        let peer = conn.peer();

        if let Err(e) = self.handle(&mut conn).await {
            warn!(%peer, error = %e, "abandoning connection");
        }

        if let Err(e) = conn.close().await {
            debug!(%peer, error = %e, "close failed");
        }
        Ok(())
    }

    async fn handle(&self, conn: &mut Connection) -> Result<(), NetError> {
        conn.set_poll_interval(self.poll_interval);
        let frame = loop {
            if let Some(frame) = conn.try_read_frame().await? {
                break frame;
            }
        };

        let response = match parse_frame(&frame) {
            Ok(request) => {
                info!(
                    peer = %conn.peer(),
                    method = %request.method,
                    path = %request.path,
                    "dispatching request"
                );
                self.router.dispatch(request)
            }
            Err(e) => {
                warn!(peer = %conn.peer(), error = %e, "rejecting malformed request");
                format_text(StatusCode::BadRequest, Mime::Plain, &e.to_string())
            }
        };

        conn.send(&response).await?;
        Ok(())
    }
}
