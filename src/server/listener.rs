// Listener module
// Creates the TCP listener; a port already in use is a startup error

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::error::StartupError;

/// Create a `TcpListener` bound to `addr`.
///
/// `SO_REUSEADDR` is set on Unix so a restart is not blocked by sockets in
/// `TIME_WAIT`. `SO_REUSEPORT` is deliberately not set: a second instance on
/// the same port must fail to bind.
///
/// Must be called from within a Tokio runtime.
pub fn bind(addr: SocketAddr) -> Result<TcpListener, StartupError> {
    create_listener(addr).map_err(|source| StartupError::Bind { addr, source })
}

fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    #[cfg(unix)]
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
