//! HTTP response building module
//!
//! Every response is plain text: the installer consumes the body verbatim,
//! so the content type is fixed and Content-Length always carries the exact
//! byte count.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Build a 200 response carrying the acquired file bytes
pub fn build_ok_response(data: Vec<u8>) -> Response<Full<Bytes>> {
    let content_length = data.len();
    Response::builder()
        .status(200)
        .header("Content-Type", CONTENT_TYPE)
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(data)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a plain-text error response (404, 500, 502)
pub fn build_error_response(status: u16, message: &str) -> Response<Full<Bytes>> {
    let body = format!("{message}\n");
    Response::builder()
        .status(status)
        .header("Content-Type", CONTENT_TYPE)
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("error", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let body = "405 Method Not Allowed\n";
    Response::builder()
        .status(405)
        .header("Content-Type", CONTENT_TYPE)
        .header("Content-Length", body.len())
        .header("Allow", "GET, POST")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(resp: &'a Response<Full<Bytes>>, name: &str) -> &'a str {
        resp.headers().get(name).unwrap().to_str().unwrap()
    }

    #[test]
    fn test_ok_response_headers() {
        let data = b"key = \"value\"\n".to_vec();
        let len = data.len();
        let resp = build_ok_response(data);

        assert_eq!(resp.status(), 200);
        assert_eq!(header(&resp, "Content-Type"), "text/plain; charset=utf-8");
        assert_eq!(header(&resp, "Content-Length"), len.to_string());
    }

    #[test]
    fn test_ok_response_empty_body() {
        let resp = build_ok_response(Vec::new());
        assert_eq!(resp.status(), 200);
        assert_eq!(header(&resp, "Content-Length"), "0");
    }

    #[test]
    fn test_error_response() {
        let resp = build_error_response(502, "Upstream returned HTTP 404 for answer.toml");
        assert_eq!(resp.status(), 502);
        assert_eq!(header(&resp, "Content-Type"), "text/plain; charset=utf-8");
        // message plus trailing newline
        assert_eq!(header(&resp, "Content-Length"), "43");
    }

    #[test]
    fn test_405_allows_get_and_post() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(header(&resp, "Allow"), "GET, POST");
    }
}
