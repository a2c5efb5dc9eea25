//! Exact-path request routing.
//!
//! The router maps path strings to handlers and always has a fallback for
//! everything else. It holds at most `capacity` routes; once full, new paths
//! are dropped while already registered paths can still be replaced.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::http::request::Request;

/// A route handler. Returning `None` hands the request to the fallback.
pub type Handler = Arc<dyn Fn(&Request) -> Option<Bytes> + Send + Sync>;

/// The fallback handler, which must always produce a response.
pub type Fallback = Arc<dyn Fn(&Request) -> Bytes + Send + Sync>;

/// What [`Router::register`] did with a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    Replaced,
    /// The table was full and the path was new.
    Dropped,
}

pub struct Router {
    routes: HashMap<String, Handler>,
    capacity: usize,
    fallback: Fallback,
}

impl Router {
    /// Creates an empty router holding up to `capacity` routes, not counting
    /// the fallback.
    pub fn new<F>(capacity: usize, fallback: F) -> Self
    where
        F: Fn(&Request) -> Bytes + Send + Sync + 'static,
    {
        Self {
            routes: HashMap::with_capacity(capacity),
            capacity,
            fallback: Arc::new(fallback),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes requests for exactly `path` to `handler`.
    pub fn register<H>(&mut self, path: &str, handler: H) -> Registration
    where
        H: Fn(&Request) -> Option<Bytes> + Send + Sync + 'static,
    {
        if let Some(slot) = self.routes.get_mut(path) {
            *slot = Arc::new(handler);
            debug!(path, "route replaced");
            return Registration::Replaced;
        }

        if self.routes.len() >= self.capacity {
            warn!(path, capacity = self.capacity, "route table full, registration dropped");
            return Registration::Dropped;
        }

        self.routes.insert(path.to_string(), Arc::new(handler));
        debug!(path, "route registered");
        Registration::Inserted
    }

    /// Runs the handler for `request.path`, or the fallback.
    ///
    /// The request is consumed; the returned bytes belong to the caller.
    pub fn dispatch(&self, request: Request) -> Bytes {
        match self.routes.get(&request.path) {
            Some(handler) => match handler(&request) {
                Some(response) => response,
                None => {
                    debug!(path = %request.path, "handler declined, using fallback");
                    (self.fallback)(&request)
                }
            },
            None => (self.fallback)(&request),
        }
    }
}
