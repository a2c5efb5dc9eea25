use thiserror::Error;

use crate::http::request::Request;

/// Why a header frame could not be turned into a [`Request`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("request frame is not valid UTF-8")]
    InvalidEncoding,

    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("malformed header line: {0:?}")]
    MalformedHeaderLine(String),
}

/// Parses a raw header frame.
pub fn parse_frame(frame: &[u8]) -> Result<Request, ParseError> {
    let text = std::str::from_utf8(frame).map_err(|_| ParseError::InvalidEncoding)?;
    parse_request(text)
}

/// Parses the text of a header frame into a [`Request`].
///
/// The first line must hold exactly three space-separated tokens: method,
/// path and version. Every following line up to the first blank one is a
/// `Key: Value` pair; a repeated key overwrites the earlier value in place.
/// Neither line length nor header count is limited.
pub fn parse_request(text: &str) -> Result<Request, ParseError> {
    let mut lines = text.split('\n').map(strip_cr);

    let request_line = lines.next().unwrap_or_default();
    let mut tokens = request_line.split(' ').filter(|t| !t.is_empty());
    let (Some(method), Some(path), Some(version), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(ParseError::MalformedRequestLine(request_line.to_string()));
    };

    let mut request = Request::new(method, path, version);

    for line in lines {
        if line.is_empty() {
            break;
        }

        let (key, value) = line
            .split_once(": ")
            .ok_or_else(|| ParseError::MalformedHeaderLine(line.to_string()))?;

        request.headers.insert(strip_cr(key), strip_cr(value));
    }

    Ok(request)
}

fn strip_cr(s: &str) -> &str {
    s.strip_suffix('\r').unwrap_or(s)
}
