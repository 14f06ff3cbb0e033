// Connection handling module
// Serves one accepted TCP connection with hyper's HTTP/1 machinery

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;

use crate::handler::{self, AppState};
use crate::logger;

/// Serve a single connection in a spawned task.
///
/// Each connection is independent: the only shared data is the read-only
/// `AppState`, so no coordination is needed between tasks.
pub fn handle_connection(stream: tokio::net::TcpStream, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                handler::handle_request(req, state)
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
