//! The single-client web server.
//!
//! - **`router`**: exact-path routing table with a fallback
//! - **`handlers`**: the `/hello` and `/roll` pages and static files
//! - **`listener`**: the accept, dispatch, respond, close loop

pub mod handlers;
pub mod listener;
pub mod router;

pub use listener::Server;
pub use router::{Registration, Router};
