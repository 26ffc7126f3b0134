//! Response Relay Module
//!
//! Streams the origin response to the client while deciding whether to
//! capture the body for caching.

use tokio::io::{AsyncBufRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::http::{is_blank_line, line_text, read_line};

// == Relay Outcome ==
/// What the relay observed: the declared body size and, when the body was
/// small enough to cache, an owned copy of it.
#[derive(Debug, Default)]
pub struct RelayOutcome {
    /// Body length declared by the origin's Content-Length header
    pub declared_size: usize,
    /// The relayed body, present only when eligible for caching
    pub cacheable_body: Option<Vec<u8>>,
}

// == Relay Response ==
/// Forwards the origin's status line, headers, and body to the client.
///
/// The status line and every header line are forwarded verbatim while
/// scanning case-insensitively for Content-Length. A body is read only
/// when a non-zero length was declared; response framing relies on
/// Content-Length alone. Bodies within `max_object_size` are additionally
/// captured for the cache.
pub async fn relay_response<R, W>(
    origin: &mut R,
    client: &mut W,
    max_object_size: usize,
) -> Result<RelayOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut outcome = RelayOutcome::default();

    // Status line, forwarded verbatim
    let status_line = read_line(origin).await?;
    if status_line.is_empty() {
        return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
    }
    client.write_all(&status_line).await?;

    // Header lines, forwarded verbatim while scanning for Content-Length
    loop {
        let line = read_line(origin).await?;
        if line.is_empty() {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        client.write_all(&line).await?;
        if is_blank_line(&line) {
            break;
        }
        if let Some(size) = content_length(line_text(&line).as_ref()) {
            outcome.declared_size = size;
        }
    }

    // Body, transferred only when a length was declared
    if outcome.declared_size > 0 {
        let mut body = vec![0u8; outcome.declared_size];
        origin.read_exact(&mut body).await?;
        client.write_all(&body).await?;
        if outcome.declared_size <= max_object_size {
            outcome.cacheable_body = Some(body);
        }
    }
    client.flush().await?;

    Ok(outcome)
}

// == Content-Length Scan ==
/// Extracts a Content-Length value from one header line.
///
/// The name match is case-insensitive; an unparsable value behaves as if
/// the header were absent.
fn content_length(line: &str) -> Option<usize> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("Content-Length") {
        return None;
    }
    value.trim().parse().ok()
}
