//! Handlers for the demo site.

use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use rand::Rng;
use tracing::debug;

use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::{Mime, StatusCode};
use crate::http::writer::{format_response, format_text};
use crate::server::router::Router;

pub const HELLO_PATH: &str = "/hello";
pub const ROLL_PATH: &str = "/roll";

const HELLO_RESPONSE: &str = "Hello, world!";

pub fn hello(_req: &Request) -> Option<Bytes> {
    Some(format_text(StatusCode::Ok, Mime::Html, HELLO_RESPONSE))
}

/// One roll of a six-sided die, as a single digit.
pub fn roll(_req: &Request) -> Option<Bytes> {
    let face: u8 = rand::thread_rng().gen_range(1..=6);
    let body = [b'0' + face];
    Some(format_response(StatusCode::Ok, Mime::Html, Some(body.as_slice())))
}

/// Serves files below a root directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Answers with the file named by the request path.
    ///
    /// - 400 when the root directory itself does not exist
    /// - 404 when the file does not exist or cannot be read
    /// - 403 when the path resolves outside the root
    pub fn serve(&self, req: &Request) -> Bytes {
        let Ok(root) = self.root.canonicalize() else {
            return format_text(StatusCode::BadRequest, Mime::Plain, "Static root is missing");
        };

        let requested = self.root.join(req.path.trim_start_matches('/'));
        let resolved = match requested.canonicalize() {
            Ok(path) => path,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return format_text(StatusCode::NotFound, Mime::Plain, "Not Found");
            }
            Err(_) => return format_text(StatusCode::Forbidden, Mime::Plain, "Forbidden"),
        };

        if !resolved.starts_with(&root) {
            debug!(path = %req.path, "path escapes static root");
            return format_text(StatusCode::Forbidden, Mime::Plain, "Forbidden");
        }

        match std::fs::read(&resolved) {
            Ok(body) => format_response(StatusCode::Ok, mime::from_path(&resolved), Some(body.as_slice())),
            Err(_) => format_text(StatusCode::NotFound, Mime::Plain, "Not Found"),
        }
    }
}

/// The router the server binary runs with: `/hello`, `/roll`, and static
/// files for everything else.
pub fn default_router(capacity: usize, static_root: impl Into<PathBuf>) -> Router {
    let files = StaticFiles::new(static_root);
    let mut router = Router::new(capacity, move |req: &Request| files.serve(req));
    router.register(HELLO_PATH, hello);
    router.register(ROLL_PATH, roll);
    router
}
