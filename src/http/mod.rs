//! HTTP protocol implementation.
//!
//! This module turns a raw stream socket into requests and formats the bytes
//! sent back.
//!
//! # Architecture
//!
//! - **`connection`**: Socket wrapper with blocking and poll-first reads
//! - **`frame`**: Growable buffer that finds the `\r\n\r\n` header delimiter
//! - **`parser`**: Parses a header frame into a request
//! - **`request`**: HTTP request representation and ordered headers
//! - **`response`**: Supported status codes and content types
//! - **`writer`**: Serializes responses to bytes
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Reading a request
//!
//! ```text
//!   socket bytes ──► residual buffer ──► FrameBuffer ──► header frame
//!                          ▲                  │
//!                          └── bytes past ◄───┘
//!                              the delimiter
//! ```
//!
//! A body, when the client sends one, is read afterwards with
//! `Connection::read_exact`, which drains the residual buffer before
//! touching the socket again.
//!
//! # Example
//!
//! ```ignore
//! use webserv::http::connection::Listener;
//! use webserv::http::parser::parse_frame;
//!
//! let listener = Listener::bind("127.0.0.1:8080").await?;
//! let mut conn = listener.accept().await?;
//! let frame = conn.read_frame().await?;
//! let request = parse_frame(&frame)?;
//! ```

pub mod connection;
pub mod frame;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
