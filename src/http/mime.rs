//! Content-type lookup by file extension.

/// Returned for anything without a known extension.
pub const OCTET_STREAM: &str = "application/octet-stream";

const TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("htm", "text/html; charset=utf-8"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("txt", "text/plain; charset=utf-8"),
];

/// Classifies `path` by whatever follows its last `.`.
///
/// Matching is case-insensitive. Paths without a dot, or with an unknown
/// suffix, map to [`OCTET_STREAM`].
///
/// # Example
///
/// ```
/// # use beacon::http::mime::classify;
/// assert_eq!(classify("/spiffs/app.JS"), "application/javascript");
/// assert_eq!(classify("/spiffs/LICENSE"), "application/octet-stream");
/// ```
pub fn classify(path: &str) -> &'static str {
    let Some((_, ext)) = path.rsplit_once('.') else {
        return OCTET_STREAM;
    };

    TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
        .unwrap_or(OCTET_STREAM)
}
