// Connection handling module
// Serves one accepted TCP connection with hyper's HTTP/1.1 server

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::http::AllowAnyOrigin;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// The request handler is wrapped in the CORS layer, so every response on the
/// connection carries `Access-Control-Allow-Origin: *`. Connection errors are
/// logged and end only this connection.
pub fn spawn_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = AllowAnyOrigin::new(service_fn(move |req: Request<Incoming>| {
            handler::handle_request(req, Arc::clone(&state), peer_addr)
        }));

        if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
            logger::log_connection_error(&err);
        }
    });
}
