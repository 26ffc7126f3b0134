//! Connection Handler Module
//!
//! Orchestrates one full request/response cycle per accepted connection:
//! parse, cache lookup, then either serve from the cache or forward to
//! the origin and relay the response.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::events::{log_manifest, tracing_hook, EventHook, ProxyEvent};
use crate::http::{
    is_blank_line, line_text, parse_request_line, read_line, resolve_target,
    write_error_response, FilteredHeaders,
};
use crate::proxy::{build_request, connect_origin, forward_request, relay_response};

// == App State ==
/// Shared state injected into every connection handler.
///
/// The cache store is behind a single RwLock; compound operations
/// (lookup-then-touch, insert-with-eviction) each run under one write
/// guard so they are atomic with respect to concurrent requests.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore>>,
    /// Cache sizing parameters
    pub config: Config,
    /// Diagnostic event callback
    pub hook: EventHook,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore, config: Config) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            config,
            hook: tracing_hook(),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = CacheStore::new(config.max_cache_size, config.max_object_size);
        Self::new(cache, config.clone())
    }

    /// Replaces the diagnostic event hook.
    pub fn with_hook(mut self, hook: EventHook) -> Self {
        self.hook = hook;
        self
    }

    pub(crate) fn emit(&self, event: ProxyEvent) {
        (self.hook)(&event);
    }
}

// == Handle Connection ==
/// Runs one request/response cycle, then closes the connection.
///
/// Validation failures produce a 400 error page embedding the offending
/// token. An unreachable origin or a socket failure closes the connection
/// with no response.
pub async fn handle_connection(stream: TcpStream, state: AppState) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    if let Err(error) = run_cycle(&mut reader, &mut write_half, &state).await {
        match error.cause_token() {
            Some(cause) => {
                let cause = cause.to_string();
                if let Err(write_error) = write_error_response(
                    &mut write_half,
                    "400",
                    "Bad request",
                    "Request could not be understood by the server",
                    &cause,
                )
                .await
                {
                    debug!(%write_error, "failed to write error page");
                }
            }
            None => debug!(%error, "request cycle aborted"),
        }
    }
    write_half.shutdown().await.ok();

    log_manifest(&*state.cache.read().await);
}

// == Request Cycle ==
/// One cycle: read request line and headers, consult the cache, and on a
/// miss resolve the target, forward the request, and relay the response.
async fn run_cycle<R, W>(reader: &mut R, writer: &mut W, state: &AppState) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    // Request line
    let line = read_line(reader).await?;
    if line.is_empty() {
        // Client closed without sending a request
        return Ok(());
    }
    let request = parse_request_line(line_text(&line).as_ref())?;
    debug!(method = %request.method, target = %request.target, "request received");

    // Headers, filtered as they arrive
    let mut headers = FilteredHeaders::default();
    loop {
        let line = read_line(reader).await?;
        if line.is_empty() {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        if is_blank_line(&line) {
            break;
        }
        headers.push(&line)?;
    }

    // Cache lookup; a hit is served locally and promoted. One write guard
    // covers lookup and touch.
    {
        let mut cache = state.cache.write().await;
        if let Some(entry) = cache.lookup(&request.target) {
            let body = entry.body.clone();
            let size = entry.size;
            cache.touch(&request.target);
            drop(cache);

            state.emit(ProxyEvent::CacheHit {
                key: request.target.clone(),
                size,
            });
            return serve_cached(writer, &body).await;
        }
    }
    state.emit(ProxyEvent::CacheMiss {
        key: request.target.clone(),
    });

    // Resolve and contact the origin
    let origin = resolve_target(&request.target)?;
    let mut origin_stream = connect_origin(&origin).await?;
    let outgoing = build_request(&request.method, &origin, &headers);
    forward_request(&mut origin_stream, &outgoing).await?;

    // Relay the response, capturing small bodies for the cache
    let mut origin_reader = BufReader::new(origin_stream);
    let relayed = relay_response(&mut origin_reader, writer, state.config.max_object_size).await?;

    if let Some(body) = relayed.cacheable_body {
        let key = request.target.clone();
        let size = body.len();
        let outcome = state.cache.write().await.insert(key.clone(), body);

        for (evicted_key, evicted_size) in outcome.evicted {
            state.emit(ProxyEvent::Evicted {
                key: evicted_key,
                size: evicted_size,
            });
        }
        if outcome.admitted {
            state.emit(ProxyEvent::Stored { key, size });
        }
    }

    Ok(())
}

// == Serve Cached ==
/// Writes a synthesized HTTP/1.0 response around a cached body.
async fn serve_cached<W>(writer: &mut W, body: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(b"HTTP/1.0 200 OK\r\nConnection: close\r\n\r\n")
        .await?;
    writer.write_all(body).await?;
    writer.flush().await?;
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProxyError;

    fn state_with_entry(key: &str, body: &[u8]) -> AppState {
        let config = Config::default();
        let mut cache = CacheStore::new(config.max_cache_size, config.max_object_size);
        cache.insert(key.to_string(), body.to_vec());
        AppState::new(cache, config)
    }

    async fn run(request: &[u8], state: &AppState) -> (Result<()>, Vec<u8>) {
        let mut reader = BufReader::new(request);
        let mut writer: Vec<u8> = Vec::new();
        let result = run_cycle(&mut reader, &mut writer, state).await;
        (result, writer)
    }

    #[tokio::test]
    async fn test_cache_hit_synthesizes_response() {
        let state = state_with_entry("http://example.com/a.txt", b"hello world");

        let (result, written) =
            run(b"GET http://example.com/a.txt HTTP/1.0\r\n\r\n", &state).await;

        result.unwrap();
        assert_eq!(
            written,
            b"HTTP/1.0 200 OK\r\nConnection: close\r\n\r\nhello world"
        );

        let stats = state.cache.read().await.stats();
        assert_eq!(stats.hits, 1);
    }

    #[tokio::test]
    async fn test_cache_hit_promotes_entry() {
        let config = Config {
            max_cache_size: 100,
            max_object_size: 100,
        };
        let mut cache = CacheStore::new(config.max_cache_size, config.max_object_size);
        cache.insert("http://a/x".to_string(), vec![b'a'; 40]);
        cache.insert("http://b/x".to_string(), vec![b'b'; 40]);
        let state = AppState::new(cache, config);

        // Serving "http://a/x" promotes it over "http://b/x"
        let (result, _) = run(b"GET http://a/x HTTP/1.0\r\n\r\n", &state).await;
        result.unwrap();

        let mut cache = state.cache.write().await;
        let outcome = cache.insert("http://c/x".to_string(), vec![b'c'; 40]);
        assert_eq!(outcome.evicted, vec![("http://b/x".to_string(), 40)]);
    }

    #[tokio::test]
    async fn test_malformed_request_line() {
        let state = AppState::from_config(&Config::default());

        let (result, written) = run(b"GET\r\n\r\n", &state).await;

        assert!(matches!(result, Err(ProxyError::MalformedRequestLine(_))));
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_header() {
        let state = AppState::from_config(&Config::default());

        let (result, _) = run(
            b"GET http://example.com/ HTTP/1.0\r\nNoColonHere\r\n\r\n",
            &state,
        )
        .await;

        assert!(matches!(result, Err(ProxyError::MalformedHeader(_))));
    }

    #[tokio::test]
    async fn test_malformed_target_detected_after_headers() {
        let state = AppState::from_config(&Config::default());

        let (result, _) = run(b"GET malformed-uri HTTP/1.0\r\n\r\n", &state).await;

        assert!(matches!(result, Err(ProxyError::MalformedTarget(_))));
    }

    #[tokio::test]
    async fn test_empty_connection_is_not_an_error() {
        let state = AppState::from_config(&Config::default());

        let (result, written) = run(b"", &state).await;

        result.unwrap();
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn test_truncated_headers_abort() {
        let state = AppState::from_config(&Config::default());

        let (result, _) = run(b"GET http://example.com/ HTTP/1.0\r\nHost: example.com\r\n", &state).await;

        assert!(matches!(result, Err(ProxyError::Io(_))));
    }
}
