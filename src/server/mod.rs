//! Server module entry point

pub mod connection;
pub mod listener;

pub use connection::handle_connection;
pub use listener::create_listener;
