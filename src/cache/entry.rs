//! Cache Entry Module
//!
//! Defines the structure for individual cached response bodies.

// == Cache Entry ==
/// A single cached response body, keyed by the request target it was
/// fetched for.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Request target this body answers
    pub key: String,
    /// The response body bytes
    pub body: Vec<u8>,
    /// Byte length of the body
    pub size: usize,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry; the size is taken from the body length.
    pub fn new(key: String, body: Vec<u8>) -> Self {
        let size = body.len();
        Self { key, body, size }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("http://example.com/a".to_string(), b"hello".to_vec());

        assert_eq!(entry.key, "http://example.com/a");
        assert_eq!(entry.body, b"hello");
        assert_eq!(entry.size, 5);
    }

    #[test]
    fn test_entry_empty_body() {
        let entry = CacheEntry::new("http://example.com/empty".to_string(), Vec::new());
        assert_eq!(entry.size, 0);
    }
}
