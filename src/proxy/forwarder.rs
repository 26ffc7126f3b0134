//! Origin Forwarder Module
//!
//! Builds and sends the rewritten outgoing request for a cache miss.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::{ProxyError, Result};
use crate::http::{FilteredHeaders, Origin};

// == Identifying User-Agent ==
/// Fixed user-agent asserted on every outgoing request.
pub const USER_AGENT_HEADER: &str =
    "User-Agent: Mozilla/5.0 (X11; Linux x86_64; rv:10.0.3) Gecko/20120305 Firefox/10.0.3";

// == Build Request ==
/// Assembles the outgoing request line and headers.
///
/// Hop-by-hop headers are regenerated by the proxy, a Host header is
/// synthesized only when the client did not supply one, and the retained
/// client headers follow verbatim, ahead of the terminating blank line.
pub fn build_request(method: &str, origin: &Origin, headers: &FilteredHeaders) -> Vec<u8> {
    let mut request = Vec::new();

    request.extend_from_slice(format!("{} {} HTTP/1.0\r\n", method, origin.path).as_bytes());
    request.extend_from_slice(USER_AGENT_HEADER.as_bytes());
    request.extend_from_slice(b"\r\n");
    request.extend_from_slice(b"Connection: close\r\n");
    request.extend_from_slice(b"Proxy-Connection: close\r\n");
    if !headers.has_host {
        request.extend_from_slice(format!("Host: {}\r\n", origin.authority()).as_bytes());
    }
    for line in &headers.lines {
        request.extend_from_slice(line);
    }
    request.extend_from_slice(b"\r\n");

    request
}

// == Connect Origin ==
/// Opens a connection to the resolved origin.
///
/// Connection failures are not retried.
pub async fn connect_origin(origin: &Origin) -> Result<TcpStream> {
    TcpStream::connect((origin.host.as_str(), origin.port))
        .await
        .map_err(|source| ProxyError::OriginUnreachable {
            host: origin.host.clone(),
            port: origin.port,
            source,
        })
}

// == Forward Request ==
/// Sends the assembled request as a single write.
pub async fn forward_request<W>(writer: &mut W, request: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(request).await?;
    writer.flush().await?;
    Ok(())
}
