//! Proxy Module
//!
//! The request/response relay pipeline: forwarding rewritten requests to
//! origin servers, relaying responses while deciding what to cache, and
//! orchestrating one exchange per connection.

mod forwarder;
mod handler;
mod relay;

// Re-export public types
pub use forwarder::{build_request, connect_origin, forward_request, USER_AGENT_HEADER};
pub use handler::{handle_connection, AppState};
pub use relay::{relay_response, RelayOutcome};
