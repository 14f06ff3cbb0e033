//! HTTP layer entry point

pub mod response;

pub use response::{build_405_response, build_error_response, build_ok_response};
