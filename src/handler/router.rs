//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method gate, path
//! normalization, route table lookup, source acquisition, and the mapping
//! of acquisition failures to HTTP statuses.

use super::AppState;
use crate::http;
use crate::logger;
use crate::source;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling.
///
/// Drains the POST body (the installer posts system information we never
/// act on) and delegates to [`respond`].
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_string();

    if state.config.logging.access_log {
        logger::log_request(&parts.method, &path);
    }

    if parts.method == Method::POST {
        // Read in full so the client can finish sending, then discard
        if let Err(e) = body.collect().await {
            logger::log_warning(&format!("Failed to read POST body: {e}"));
        }
    }

    Ok(respond(&parts.method, &path, &state).await)
}

/// Produce the response for a method and raw request path.
///
/// GET and POST are equivalent here; anything else is rejected up front.
pub async fn respond(method: &Method, raw_path: &str, state: &AppState) -> Response<Full<Bytes>> {
    if *method != Method::GET && *method != Method::POST {
        logger::log_warning(&format!("Method not allowed: {method}"));
        return http::build_405_response();
    }

    let path = normalize_path(raw_path, &state.config.routes.default);

    let Some(file_source) = state.config.routes.table.get(path.as_str()) else {
        let available = state.config.routes.sorted_keys().join(", ");
        let message = format!("Endpoint '{path}' not found. Available: {available}");
        logger::log_warning(&message);
        return http::build_error_response(404, &message);
    };

    match source::acquire(file_source, &state.fetcher).await {
        Ok(data) => {
            if state.config.logging.access_log {
                logger::log_response(200, data.len());
            }
            http::build_ok_response(data)
        }
        Err(err) => {
            logger::log_source_error(&path, &err);
            http::build_error_response(err.status(), &err.to_string())
        }
    }
}

/// Strip trailing slashes; an empty result means the default route.
///
/// No case folding, percent decoding, or query handling: the installer
/// requests exact paths.
fn normalize_path(raw_path: &str, default_route: &str) -> String {
    let trimmed = raw_path.trim_end_matches('/');
    if trimmed.is_empty() {
        default_route.to_string()
    } else {
        trimmed.to_string()
    }
}
