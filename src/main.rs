//! Serves Proxmox unattended-install answer files over HTTP.
//!
//! The installer polls a fixed URL during provisioning; every configured
//! route maps to a file source, either fetched from a raw-content endpoint
//! per request or read from a local path chosen at startup.

use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod source;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = config::Config::load()?;

    // Prompt sources talk to the operator on stdin, local paths are
    // validated to exist; both must finish before the listener binds.
    config::prompt::resolve_sources(&mut cfg.routes)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    let listener = server::create_listener(addr).map_err(|e| {
        logger::log_error(&format!("Failed to bind {addr}: {e}"));
        e
    })?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(handler::AppState::new(cfg));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _peer_addr)) => {
                        server::handle_connection(stream, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}
