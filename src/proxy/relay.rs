//! Relaying a client connection to an upstream server.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::http::connection::{Connection, NetError};
use crate::proxy::multiplex::{multiplex, Forward};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("upstream URL has no host")]
    MissingHost,

    #[error("unsupported upstream scheme `{0}`")]
    UnsupportedScheme(String),

    #[error(transparent)]
    Net(#[from] NetError),
}

/// Where relayed traffic goes, parsed from an `http://host[:port]` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    pub host: String,
    pub port: u16,
}

impl Upstream {
    pub fn parse(raw: &str) -> Result<Self, RelayError> {
        let url = url::Url::parse(raw)?;
        if url.scheme() != "http" {
            return Err(RelayError::UnsupportedScheme(url.scheme().to_string()));
        }

        let host = url.host_str().ok_or(RelayError::MissingHost)?.to_string();
        let port = url.port_or_known_default().unwrap_or(80);
        Ok(Self { host, port })
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Connects to `upstream` and forwards frames both ways until one side
/// hangs up.
///
/// Both connections are closed before returning. A peer closing its end is
/// the normal way for a relay to finish and is not reported as an error.
pub async fn relay(mut local: Connection, upstream: &Upstream) -> Result<(), RelayError> {
    let mut remote = Connection::open_as_client(&upstream.host, upstream.port).await?;
    info!(client = %local.peer(), %upstream, "relaying");

    let mut to_remote = Forward::new();
    let mut to_local = Forward::new();
    let outcome = match multiplex(&mut local, &mut remote, &mut to_remote, &mut to_local).await {
        Ok(never) => match never {},
        Err(e) => e,
    };

    info!(
        client = %local.peer(),
        %upstream,
        upstream_frames = to_remote.frames(),
        upstream_bytes = to_remote.bytes(),
        client_frames = to_local.frames(),
        client_bytes = to_local.bytes(),
        "relay finished"
    );

    for conn in [local, remote] {
        let peer = conn.peer();
        if let Err(e) = conn.close().await {
            debug!(%peer, error = %e, "close failed");
        }
    }

    match outcome {
        NetError::Closed => Ok(()),
        other => Err(other.into()),
    }
}
