// Server loop module
// Accepts connections until the process is terminated

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::spawn_connection;
use crate::config::AppState;
use crate::logger;

/// Accept connections forever, one task per connection
///
/// Accept failures (e.g. file descriptor exhaustion) are logged and the loop
/// keeps going; there is no shutdown path.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                spawn_connection(stream, peer_addr, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
