//! HTTP Wire Module
//!
//! Line-oriented reading and parsing for the HTTP/1.0 wire protocol.
//!
//! Lines are read into growable buffers and kept as raw bytes so they can
//! be forwarded verbatim; parsing works on a lossy text overlay.

mod error_page;
mod request;
mod target;

// Re-export public types
pub use error_page::{render_error_body, write_error_response};
pub use request::{parse_request_line, FilteredHeaders, RequestLine, HOP_BY_HOP_HEADERS};
pub use target::{resolve_target, Origin};

use std::borrow::Cow;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

// == Wire Line Reading ==
/// Reads one line including its terminator into a growable buffer.
///
/// Returns an empty buffer at end of stream.
pub async fn read_line<R>(reader: &mut R) -> std::io::Result<Vec<u8>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).await?;
    Ok(line)
}

// == Blank Line ==
/// True when a line is a bare CRLF (or LF) header-block terminator.
pub fn is_blank_line(line: &[u8]) -> bool {
    matches!(line, b"\r\n" | b"\n")
}

// == Text Overlay ==
/// Lossily decodes a wire line for parsing. Forwarding always uses the
/// raw bytes, never this overlay.
pub fn line_text(line: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(line)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn test_read_line_keeps_terminator() {
        let input = b"GET / HTTP/1.0\r\nHost: example.com\r\n".to_vec();
        let mut reader = BufReader::new(&input[..]);

        let line = read_line(&mut reader).await.unwrap();
        assert_eq!(line, b"GET / HTTP/1.0\r\n");

        let line = read_line(&mut reader).await.unwrap();
        assert_eq!(line, b"Host: example.com\r\n");

        let line = read_line(&mut reader).await.unwrap();
        assert!(line.is_empty());
    }

    #[tokio::test]
    async fn test_read_line_grows_past_small_buffers() {
        let long = format!("X-Long: {}\r\n", "a".repeat(16 * 1024));
        let mut reader = BufReader::new(long.as_bytes());

        let line = read_line(&mut reader).await.unwrap();
        assert_eq!(line.len(), long.len());
    }

    #[test]
    fn test_is_blank_line() {
        assert!(is_blank_line(b"\r\n"));
        assert!(is_blank_line(b"\n"));
        assert!(!is_blank_line(b""));
        assert!(!is_blank_line(b" \r\n"));
        assert!(!is_blank_line(b"Host: x\r\n"));
    }
}
