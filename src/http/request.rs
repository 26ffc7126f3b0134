//! Request Parsing Module
//!
//! Parses the client request line and classifies request headers as
//! hop-by-hop (stripped) or pass-through (forwarded).

use crate::error::{ProxyError, Result};

// == Hop-By-Hop Headers ==
/// Header names the proxy strips and regenerates itself.
pub const HOP_BY_HOP_HEADERS: [&str; 3] = ["User-Agent", "Connection", "Proxy-Connection"];

// == Request Line ==
/// The method, target, and version of a client request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub target: String,
    pub version: String,
}

// == Parse Request Line ==
/// Splits a request line into method, target, and version.
///
/// Fails when any of the three parts is missing after whitespace
/// splitting; extra tokens are ignored.
pub fn parse_request_line(line: &str) -> Result<RequestLine> {
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("").to_string();
    let version = parts.next().unwrap_or("").to_string();

    if method.is_empty() || target.is_empty() || version.is_empty() {
        return Err(ProxyError::MalformedRequestLine(method));
    }

    Ok(RequestLine {
        method,
        target,
        version,
    })
}

// == Filtered Headers ==
/// Client headers that survived hop-by-hop filtering, kept as raw lines
/// in their original order.
#[derive(Debug, Default)]
pub struct FilteredHeaders {
    /// Retained raw header lines, terminators included
    pub lines: Vec<Vec<u8>>,
    /// Whether the client supplied a Host header
    pub has_host: bool,
}

impl FilteredHeaders {
    // == Push ==
    /// Classifies one raw header line, retaining it unless hop-by-hop.
    ///
    /// Fails when the line has no extractable name or value after
    /// trimming.
    pub fn push(&mut self, raw: &[u8]) -> Result<()> {
        let text = super::line_text(raw);
        let (name, _value) = split_header(text.trim_end())?;

        if is_hop_by_hop(name) {
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Host") {
            self.has_host = true;
        }
        self.lines.push(raw.to_vec());
        Ok(())
    }
}

// == Split Header ==
/// Splits a header line into its name and value around the first colon.
fn split_header(line: &str) -> Result<(&str, &str)> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ProxyError::MalformedHeader(line.to_string()))?;
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() || value.is_empty() {
        return Err(ProxyError::MalformedHeader(line.to_string()));
    }
    Ok((name, value))
}

// == Hop-By-Hop Check ==
fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(name))
}
