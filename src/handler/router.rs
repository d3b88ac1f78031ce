//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! health probes, and extracting the operation segment.

use crate::config::AppState;
use crate::handler::calculate;
use crate::http::{self, ResponseBody};
use hyper::{Method, Request, Response};

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub fn handle_request<B>(req: &Request<B>, state: &AppState) -> Response<ResponseBody> {
    let method = req.method();
    let uri = req.uri();
    let path = uri.path();
    let http_config = &state.config.http;

    state
        .logger
        .debug(&format!("{method} {uri} {:?}", req.version()));

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state) {
        return resp;
    }

    // 2. Health check endpoints
    let health = &state.config.health;
    if health.enabled && (path == health.liveness_path || path == health.readiness_path) {
        return http::build_health_response(http_config);
    }

    // 3. Arithmetic route
    match operation_segment(path) {
        Some(segment) => calculate::respond(segment, uri.query(), state),
        None => {
            state.logger.warn(&format!("No route for path: {path}"));
            http::build_404_response(http_config)
        }
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, state: &AppState) -> Option<Response<ResponseBody>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(&state.config.http)),
        _ => {
            state
                .logger
                .warn(&format!("Method not allowed: {method}"));
            Some(http::build_405_response(&state.config.http))
        }
    }
}

/// Extract `op` from `/op` (or `/op/`). Any other shape has no operation.
fn operation_segment(path: &str) -> Option<&str> {
    let segment = path.strip_prefix('/')?;
    let segment = segment.strip_suffix('/').unwrap_or(segment);
    if segment.is_empty() || segment.contains('/') {
        None
    } else {
        Some(segment)
    }
}
