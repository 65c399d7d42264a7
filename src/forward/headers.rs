//! Header transformation for forwarded requests and relayed responses.

use std::net::SocketAddr;

use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, CONNECTION, HOST, PROXY_AUTHENTICATE,
    PROXY_AUTHORIZATION, TE, TRAILER, TRANSFER_ENCODING, UPGRADE,
};

pub static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
pub static X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
pub static X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

static KEEP_ALIVE: HeaderName = HeaderName::from_static("keep-alive");

/// Headers that describe a single hop, never forwarded across one.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    *name == CONNECTION
        || *name == KEEP_ALIVE
        || *name == PROXY_AUTHENTICATE
        || *name == PROXY_AUTHORIZATION
        || *name == TE
        || *name == TRAILER
        || *name == TRANSFER_ENCODING
        || *name == UPGRADE
}

/// Build the outbound header map for an upstream request.
///
/// Copies all inbound headers except `Host` (the outbound call supplies its
/// own, derived from the target URL) and the hop-by-hop set, then injects
/// the forwarding metadata: `X-Forwarded-For` (peer IP), `X-Forwarded-Proto`
/// (`https` iff the inbound connection was encrypted) and `X-Forwarded-Host`
/// (the original `Host` value). Existing `X-Forwarded-*` values are
/// overwritten, not appended.
pub fn build_upstream_headers(
    inbound: &HeaderMap,
    peer: SocketAddr,
    inbound_tls: bool,
) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len() + 3);

    for (name, value) in inbound {
        if *name == HOST || is_hop_by_hop(name) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }

    if let Ok(value) = HeaderValue::from_str(&peer.ip().to_string()) {
        outbound.insert(X_FORWARDED_FOR.clone(), value);
    }
    outbound.insert(
        X_FORWARDED_PROTO.clone(),
        HeaderValue::from_static(if inbound_tls { "https" } else { "http" }),
    );
    if let Some(host) = inbound.get(HOST) {
        outbound.insert(X_FORWARDED_HOST.clone(), host.clone());
    }

    outbound
}

/// Remove hop-by-hop headers before relaying a response.
///
/// The relay re-frames the buffered body itself, so the upstream's
/// connection-management and transfer-framing headers must not leak
/// through.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let doomed: Vec<HeaderName> = headers
        .keys()
        .filter(|name| is_hop_by_hop(*name))
        .cloned()
        .collect();
    for name in doomed {
        headers.remove(name);
    }
}
