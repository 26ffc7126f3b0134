//! Server Module
//!
//! The accept loop: hands each accepted connection to a spawned
//! connection handler. The cache store is the only state shared across
//! connections, through the AppState.

use tokio::net::TcpListener;
use tracing::warn;

use crate::events::ProxyEvent;
use crate::proxy::{handle_connection, AppState};

// == Run Server ==
/// Accepts connections until the process stops, spawning one handler
/// task per connection. Accept errors are logged and the loop continues.
pub async fn run_server(listener: TcpListener, state: AppState) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                state.emit(ProxyEvent::Connected {
                    peer: peer.to_string(),
                });
                let state = state.clone();
                tokio::spawn(async move {
                    handle_connection(stream, state).await;
                });
            }
            Err(error) => {
                warn!(%error, "failed to accept connection");
            }
        }
    }
}
