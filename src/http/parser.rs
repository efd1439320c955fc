/// Path used whenever the request line cannot be split.
pub const DEFAULT_PATH: &str = "/";

/// Extracts the path token from the request line `<METHOD> <path> <version>`.
///
/// The buffer is read as a C string (it ends at the first NUL byte) and only
/// its first line is consulted. Method and version are never validated; a
/// line without two spaces yields [`DEFAULT_PATH`]. Tokens longer than
/// `max_len` bytes are cut to `max_len`.
pub fn parse_request_path(buf: &[u8], max_len: usize) -> String {
    let buf = match buf.iter().position(|&b| b == 0) {
        Some(nul) => &buf[..nul],
        None => buf,
    };
    let line = match buf.iter().position(|&b| b == b'\n') {
        Some(eol) => &buf[..eol],
        None => buf,
    };

    let Some(first) = line.iter().position(|&b| b == b' ') else {
        return DEFAULT_PATH.to_string();
    };
    let rest = &line[first + 1..];
    let Some(second) = rest.iter().position(|&b| b == b' ') else {
        return DEFAULT_PATH.to_string();
    };

    let token = &rest[..second.min(max_len)];
    String::from_utf8_lossy(token).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        assert_eq!(parse_request_path(req, 255), "/");
    }

    #[test]
    fn stops_at_nul() {
        let req = b"GET /a\0b HTTP/1.1\r\n";

        assert_eq!(parse_request_path(req, 255), "/");
    }
}
