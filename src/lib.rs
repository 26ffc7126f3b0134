//! Mini Proxy - A lightweight caching HTTP proxy
//!
//! Relays HTTP/1.0 requests to origin servers and caches small response
//! bodies with LRU eviction under a total byte budget.

pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod proxy;
pub mod server;

pub use config::Config;
pub use proxy::AppState;
pub use server::run_server;
