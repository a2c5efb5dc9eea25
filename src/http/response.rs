/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Malformed request
/// - `Forbidden` (403): Path outside the served directory
/// - `NotFound` (404): Resource not found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Maps a numeric code onto a supported status.
    ///
    /// # Panics
    ///
    /// On any code other than 200, 400, 403 and 404. Asking for another code
    /// is a bug in the caller, not something a request can trigger.
    pub fn from_u16(code: u16) -> Self {
        match code {
            200 => StatusCode::Ok,
            400 => StatusCode::BadRequest,
            403 => StatusCode::Forbidden,
            404 => StatusCode::NotFound,
            other => panic!("unsupported response status code: `{other}`"),
        }
    }

    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserv::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Content types the server labels its bodies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mime {
    Plain,
    Html,
    JavaScript,
    Json,
    Wasm,
    Png,
    OctetStream,
}

impl Mime {
    /// Value of the `Content-Type` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mime::Plain => "text/plain",
            Mime::Html => "text/html",
            Mime::JavaScript => "text/javascript",
            Mime::Json => "text/json",
            Mime::Wasm => "application/wasm",
            Mime::Png => "image/png",
            Mime::OctetStream => "application/octet-stream",
        }
    }
}
