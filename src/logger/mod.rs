//! Logger module
//!
//! Timestamped console logging: info and access lines to stdout, errors to
//! stderr. Observability only; nothing here feeds back into request
//! handling.

use crate::config::Config;
use chrono::Local;
use hyper::Method;
use std::net::SocketAddr;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn write_info(message: &str) {
    println!("[{}] {message}", timestamp());
}

fn write_error(message: &str) {
    eprintln!("[{}] {message}", timestamp());
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Proxmox answer server started");
    println!("Listening on: http://{addr}");
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Routes:");
    for key in config.routes.sorted_keys() {
        match &config.routes.table[key] {
            crate::config::FileSource::Remote { base_url, filename } => {
                println!("  {key} -> remote {base_url}/{filename}");
            }
            crate::config::FileSource::Local { path } => {
                println!("  {key} -> local {path}");
            }
            crate::config::FileSource::Prompt => {
                println!("  {key} -> (unresolved prompt)");
            }
        }
    }
    println!("Default route: {}", config.routes.default);
    println!("Note: remote files are fetched upstream on EVERY request (no caching)");
    println!("======================================\n");
}

pub fn log_request(method: &Method, path: &str) {
    write_info(&format!("[Request] {method} {path}"));
}

pub fn log_response(status: u16, size: usize) {
    write_info(&format!("[Response] {status} ({size} bytes)"));
}

pub fn log_fetch_start(url: &str) {
    write_info(&format!("Fetching from upstream: {url}"));
}

pub fn log_fetch_done(size: usize) {
    write_info(&format!("Successfully fetched {size} bytes"));
}

pub fn log_source_error(path: &str, err: &crate::source::SourceError) {
    write_error(&format!("ERROR: {path}: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("ERROR: {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("WARN: {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("ERROR: Failed to serve connection: {err:?}"));
}

pub fn log_shutdown() {
    println!("\nShutting down server...");
}
