//! Error Page Module
//!
//! Formats minimal HTML error responses for malformed requests.

use tokio::io::{AsyncWrite, AsyncWriteExt};

// == Render Body ==
/// Builds the HTML error body embedding the status code, reason phrase,
/// explanation, and offending token. Caller-supplied text is reflected
/// verbatim, without escaping.
pub fn render_error_body(code: &str, reason: &str, detail: &str, cause: &str) -> String {
    format!(
        "<html><title>Proxy Error</title><body bgcolor=\"ffffff\">\r\n\
         {code}: {reason}\r\n\
         <p>{detail}: {cause}\r\n\
         <hr><em>The mini proxy</em>\r\n"
    )
}

// == Write Error Response ==
/// Writes a complete HTTP/1.0 error response with an HTML body.
pub async fn write_error_response<W>(
    writer: &mut W,
    code: &str,
    reason: &str,
    detail: &str,
    cause: &str,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let body = render_error_body(code, reason, detail, cause);
    let head = format!(
        "HTTP/1.0 {code} {reason}\r\nContent-type: text/html\r\nContent-length: {}\r\n\r\n",
        body.len()
    );

    writer.write_all(head.as_bytes()).await?;
    writer.write_all(body.as_bytes()).await?;
    writer.flush().await
}
