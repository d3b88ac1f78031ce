//! HTTP response building module
//!
//! Every response body is JSON; builders never panic and fall back to a
//! minimal response when the builder itself fails.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::config::HttpConfig;

pub type ResponseBody = Full<Bytes>;

const ALLOW_METHODS: &str = "GET, HEAD, OPTIONS";

/// Serialize `body` and build a JSON response with the given status
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    http: &HttpConfig,
) -> Result<Response<ResponseBody>, serde_json::Error> {
    let json = serde_json::to_string(body)?;
    Ok(json_bytes_response(status, Bytes::from(json), http))
}

/// Build a JSON response from already serialized bytes
fn json_bytes_response(
    status: StatusCode,
    body: Bytes,
    http: &HttpConfig,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", "application/json; charset=utf-8")
        .header("Server", http.server_name.as_str());

    if http.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder.body(Full::new(body.clone())).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        let mut resp = Response::new(Full::new(body));
        *resp.status_mut() = status;
        resp
    })
}

/// Build 404 Not Found response
pub fn build_404_response(http: &HttpConfig) -> Response<ResponseBody> {
    json_bytes_response(
        StatusCode::NOT_FOUND,
        Bytes::from_static(br#"{"statusCode":404,"message":"Not Found"}"#),
        http,
    )
}

/// Build 500 response used when the JSON body itself cannot be produced
pub fn build_500_response(http: &HttpConfig) -> Response<ResponseBody> {
    json_bytes_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        Bytes::from_static(br#"{"statusCode":500,"message":"Internal Server Error"}"#),
        http,
    )
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(http: &HttpConfig) -> Response<ResponseBody> {
    let mut resp = json_bytes_response(
        StatusCode::METHOD_NOT_ALLOWED,
        Bytes::from_static(br#"{"statusCode":405,"message":"Method Not Allowed"}"#),
        http,
    );
    resp.headers_mut().insert(
        hyper::header::ALLOW,
        hyper::header::HeaderValue::from_static(ALLOW_METHODS),
    );
    resp
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(http: &HttpConfig) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOW_METHODS)
        .header("Server", http.server_name.as_str());

    if http.enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOW_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build health probe response
pub fn build_health_response(http: &HttpConfig) -> Response<ResponseBody> {
    json_bytes_response(
        StatusCode::OK,
        Bytes::from_static(br#"{"status":"ok"}"#),
        http,
    )
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    eprintln!("error: Failed to build {status} response: {error}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_config(enable_cors: bool) -> HttpConfig {
        HttpConfig {
            server_name: "arithmetic-service".to_string(),
            enable_cors,
        }
    }

    #[test]
    fn test_json_response_headers() {
        let resp = build_json_response(
            StatusCode::OK,
            &serde_json::json!({"statusCode": 200}),
            &http_config(false),
        )
        .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()["content-type"],
            "application/json; charset=utf-8"
        );
        assert_eq!(resp.headers()["server"], "arithmetic-service");
        assert!(resp.headers().get("access-control-allow-origin").is_none());
    }

    #[test]
    fn test_cors_header() {
        let resp = build_health_response(&http_config(true));
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    }

    #[test]
    fn test_405_allow_header() {
        let resp = build_405_response(&http_config(false));
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], ALLOW_METHODS);
    }

    #[test]
    fn test_options_preflight() {
        let resp = build_options_response(&http_config(true));
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["access-control-allow-methods"], ALLOW_METHODS);
    }
}
