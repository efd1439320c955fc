/// HTTP status codes the server can produce.
///
/// A file is either served (`Ok`) or it is not (`NotFound`); there is no
/// 500-class reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use beacon::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Body of the fixed 404 page.
pub const NOT_FOUND_BODY: &[u8] = b"<html><body><h1>404 Not Found</h1></body></html>";

/// A response head plus an optional in-memory body.
///
/// File responses carry an empty `body` and a `Content-Length` naming the
/// file size; the file itself is streamed after the head.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    /// Headers in the order they are written.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Builder for [`Response`].
///
/// # Example
///
/// ```
/// # use beacon::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/css")
///     .content_length(512)
///     .build();
///
/// assert_eq!(response.header("Content-Length"), Some("512"));
/// assert_eq!(response.header("Connection"), Some("close"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header, replacing an existing one with the same name
    /// (compared case-insensitively) in place.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Declares the length of a body that is streamed separately.
    pub fn content_length(self, len: u64) -> Self {
        self.header("Content-Length", len.to_string())
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// `Content-Length` defaults to the in-memory body size and
    /// `Connection: close` is always last.
    pub fn build(self) -> Response {
        let has_length = self
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("Content-Length"));
        let len = self.body.len() as u64;
        let builder = if has_length {
            self
        } else {
            self.content_length(len)
        };
        let mut builder = builder.header("Connection", "close");

        // keep Connection as the final header
        if let Some(pos) = builder
            .headers
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case("Connection"))
        {
            let conn = builder.headers.remove(pos);
            builder.headers.push(conn);
        }

        Response {
            status: builder.status,
            headers: builder.headers,
            body: builder.body,
        }
    }
}

impl Response {
    /// Head of a 200 response for a streamed file.
    pub fn file(content_type: &str, len: u64) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type)
            .content_length(len)
            .build()
    }

    /// The fixed 404 page.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(NOT_FOUND_BODY.to_vec())
            .build()
    }

    /// Looks up a header by name, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
