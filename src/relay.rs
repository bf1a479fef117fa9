use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use serde_json::Value;
use tracing::instrument;

use crate::{error::RelayError, path::upstream_url, state::RelayState};

/// Decides what, if anything, is sent upstream for an inbound body.
///
/// JSON that carries at least one key, element or character is re-serialized;
/// empty containers and scalars send nothing. Anything that is not JSON is passed
/// through byte for byte.
pub fn outbound_body(raw: Bytes) -> Option<Bytes> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    let value = match serde_json::from_slice::<Value>(&raw) {
        Ok(value) => value,
        Err(_) => return Some(raw),
    };

    let non_empty = match &value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(text) => !text.is_empty(),
        _ => false,
    };

    non_empty.then(|| Bytes::from(value.to_string()))
}

async fn pass_response(response: reqwest::Response) -> Result<Response, RelayError> {
    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();

    let body = response.bytes().await?;

    let mut relayed = (status, body).into_response();
    match content_type {
        Some(content_type) => {
            relayed.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        None => {
            relayed.headers_mut().remove(header::CONTENT_TYPE);
        }
    }

    Ok(relayed)
}

async fn relay(
    state: &RelayState,
    method: Method,
    url: String,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Response, RelayError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(""));

    let mut request = state
        .client
        .request(method, url)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, authorization);

    if let Some(body) = outbound_body(body) {
        request = request.body(body);
    }

    let response = request.send().await?;
    tracing::info!("upstream answered {}", response.status());

    pass_response(response).await
}

#[instrument(skip(state, headers, body))]
pub async fn relay_handler(
    State(state): State<Arc<RelayState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let url = upstream_url(&state.config, uri.path(), uri.query());
    tracing::info!("relaying {method} to {url}");

    match relay(&state, method, url, &headers, body).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!("relay failed: {err}");
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(raw: &'static [u8]) -> Option<Bytes> {
        outbound_body(Bytes::from_static(raw))
    }

    #[test]
    fn empty_bodies_send_nothing() {
        for raw in ["", "  \n", "{}", "[]", "\"\"", "null", "42", "true"] {
            assert_eq!(outbound_body(Bytes::from(raw)), None, "{raw:?}");
        }
    }

    #[test]
    fn object_is_reserialized() {
        assert_eq!(sent(br#"{"a":1}"#).as_deref(), Some(&br#"{"a":1}"#[..]));
    }

    #[test]
    fn key_order_survives() {
        assert_eq!(
            sent(br#"{ "zeta": 1, "alpha": {"b": 2, "a": 3} }"#).as_deref(),
            Some(&br#"{"zeta":1,"alpha":{"b":2,"a":3}}"#[..])
        );
    }

    #[test]
    fn non_empty_array_and_string_are_sent() {
        assert_eq!(sent(b"[1, 2]").as_deref(), Some(&b"[1,2]"[..]));
        assert_eq!(sent(br#""hi""#).as_deref(), Some(&br#""hi""#[..]));
    }

    #[test]
    fn non_json_passes_through() {
        assert_eq!(sent(b"app_id=cli_123").as_deref(), Some(&b"app_id=cli_123"[..]));
    }

    #[test]
    fn non_utf8_passes_through_untouched() {
        let raw: &'static [u8] = &[0x66, 0x6f, 0xff, 0xfe, 0x80, 0x6f];

        assert_eq!(sent(raw).as_deref(), Some(raw));
    }
}
