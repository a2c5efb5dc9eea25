//! Proxy-style relaying
//!
//! This module pairs two connections and forwards header frames between
//! them in both directions.

pub mod multiplex;
pub mod relay;

pub use multiplex::{multiplex, FrameHandler, Forward};
pub use relay::{relay, RelayError, Upstream};
