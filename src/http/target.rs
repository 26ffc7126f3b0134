//! Request Target Module
//!
//! Splits an absolute request target into host, port, and path.

use crate::error::{ProxyError, Result};

// == Origin ==
/// The resolved origin of an absolute request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Origin {
    // == Authority ==
    /// Returns the `host:port` form used for connecting and for the
    /// synthesized Host header.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// == Resolve Target ==
/// Splits an absolute target of the form `scheme://host[:port]/path...`.
///
/// The port defaults to 80. The path runs from the first slash after the
/// host onward and is passed through byte-exact, with no normalization.
/// Fails when no path is present or the port does not parse.
pub fn resolve_target(target: &str) -> Result<Origin> {
    let rest = match target.split_once("://") {
        Some((_scheme, rest)) => rest,
        None => target,
    };

    let slash = rest
        .find('/')
        .ok_or_else(|| ProxyError::MalformedTarget(target.to_string()))?;
    let (authority, path) = rest.split_at(slash);

    let (host, port) = match authority.split_once(':') {
        Some((host, port)) => {
            let port = port
                .parse()
                .map_err(|_| ProxyError::MalformedTarget(target.to_string()))?;
            (host, port)
        }
        None => (authority, 80),
    };

    Ok(Origin {
        host: host.to_string(),
        port,
        path: path.to_string(),
    })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_port() {
        let origin = resolve_target("http://example.com/a.txt").unwrap();
        assert_eq!(origin.host, "example.com");
        assert_eq!(origin.port, 80);
        assert_eq!(origin.path, "/a.txt");
    }

    #[test]
    fn test_resolve_explicit_port() {
        let origin = resolve_target("http://example.com:8080/dir/page.html").unwrap();
        assert_eq!(origin.host, "example.com");
        assert_eq!(origin.port, 8080);
        assert_eq!(origin.path, "/dir/page.html");
        assert_eq!(origin.authority(), "example.com:8080");
    }

    #[test]
    fn test_resolve_root_path() {
        let origin = resolve_target("http://example.com/").unwrap();
        assert_eq!(origin.path, "/");
    }

    #[test]
    fn test_resolve_no_path_rejected() {
        assert!(resolve_target("http://example.com").is_err());
        assert!(resolve_target("http://example.com:8080").is_err());
        assert!(resolve_target("malformed-uri").is_err());
    }

    #[test]
    fn test_resolve_path_is_byte_exact() {
        let origin = resolve_target("http://example.com/a%20b/?q=1&r=2#frag").unwrap();
        assert_eq!(origin.path, "/a%20b/?q=1&r=2#frag");
    }

    #[test]
    fn test_resolve_without_scheme() {
        let origin = resolve_target("example.com:81/x").unwrap();
        assert_eq!(origin.host, "example.com");
        assert_eq!(origin.port, 81);
        assert_eq!(origin.path, "/x");
    }

    #[test]
    fn test_resolve_bad_port_rejected() {
        assert!(resolve_target("http://example.com:abc/x").is_err());
        assert!(resolve_target("http://example.com:99999/x").is_err());
        assert!(resolve_target("http://example.com:/x").is_err());
    }
}
