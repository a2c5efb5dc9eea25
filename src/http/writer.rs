use bytes::{BufMut, Bytes, BytesMut};

use crate::http::response::{Mime, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a complete response.
///
/// Only `Content-Type` and `Content-Length` are emitted. A missing body is
/// sent as an empty one.
///
/// ```
/// # use webserv::http::response::{Mime, StatusCode};
/// # use webserv::http::writer::format_response;
/// let resp = format_response(StatusCode::Ok, Mime::Html, Some(b"Hello, world!".as_slice()));
/// assert_eq!(
///     &resp[..],
///     b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 13\r\n\r\nHello, world!"
/// );
/// ```
pub fn format_response(status: StatusCode, mime: Mime, body: Option<&[u8]>) -> Bytes {
    let body = body.unwrap_or_default();

    let head = format!(
        "{} {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase(),
        mime.as_str(),
        body.len()
    );

    let mut buf = BytesMut::with_capacity(head.len() + body.len());
    buf.put_slice(head.as_bytes());
    buf.put_slice(body);
    buf.freeze()
}

/// Shorthand for a text body.
pub fn format_text(status: StatusCode, mime: Mime, body: &str) -> Bytes {
    format_response(status, mime, Some(body.as_bytes()))
}
