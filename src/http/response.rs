//! Client-facing response construction.
//!
//! # Responsibilities
//! - Relay a buffered upstream response verbatim (minus hop-by-hop headers)
//! - Shape the structured JSON bodies for route-not-found and
//!   forwarding-failure outcomes

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde_json::json;

use crate::forward::client::{ForwardError, UpstreamResponse};
use crate::forward::headers::strip_hop_by_hop;

/// 404 body: `{error, message, proxy}`.
pub fn route_not_found(original_target: &str, proxy_name: &str) -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        json!({
            "error": "Route not found",
            "message": format!("No route configured for {original_target}"),
            "proxy": proxy_name,
        }),
    )
}

/// 502 body: `{error, message, timestamp}` with the failure cause embedded.
pub fn bad_gateway(cause: &ForwardError) -> Response {
    json_response(
        StatusCode::BAD_GATEWAY,
        json!({
            "error": "Bad Gateway",
            "message": format!("Failed to forward request: {cause}"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }),
    )
}

/// Relay the upstream's exact status, headers and buffered body.
pub fn relay_upstream(upstream: UpstreamResponse) -> Response {
    let mut headers = upstream.headers;
    strip_hop_by_hop(&mut headers);

    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = headers;
    response
}

fn json_response(status: StatusCode, body: serde_json::Value) -> Response {
    let mut response = Response::new(Body::from(body.to_string()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
