//! Canonical HTTP request construction.
//!
//! Turns a [`LambdaRequest`] into the `http::Request` handed to the handler:
//! query string rebuilt with standard form encoding, path strictly
//! percent-decoded, headers applied with multi-value precedence, and the
//! body wrapped so a base64 payload only decodes if the handler reads it.

use axum::body::Body;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use futures::stream;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request};
use lambda_axum_core::{EventError, LambdaRequest, MultiMap, path_unescape};
use url::form_urlencoded;

use crate::context::{DecodedPath, SourceIp};

pub(crate) fn build_http_request(request: LambdaRequest) -> Result<Request<Body>, EventError> {
    let LambdaRequest {
        http_method,
        path: raw_path,
        query_string_parameters,
        multi_value_query_string_parameters,
        headers: single_headers,
        multi_value_headers,
        body,
        is_base64_encoded,
        source_ip,
        payload,
        ..
    } = request;

    let query = encode_query(
        &query_string_parameters,
        &multi_value_query_string_parameters,
    );

    // The payload path arrives percent-escaped. Decode it for the logical
    // path; when the two are identical the request must be indistinguishable
    // from one constructed with that path directly, so no decoded-path
    // artifact is attached.
    let decoded_path = path_unescape(&raw_path)?;
    let had_escapes = decoded_path != raw_path;

    let method = if http_method.is_empty() {
        Method::GET
    } else {
        Method::from_bytes(http_method.as_bytes()).map_err(http::Error::from)?
    };

    let request_uri = if query.is_empty() {
        raw_path
    } else {
        format!("{raw_path}?{query}")
    };

    let headers = build_headers(&single_headers, &multi_value_headers)?;

    let body = if is_base64_encoded {
        // Decode lazily: the stream is only polled if the handler reads the
        // body, and a decode failure surfaces as a body read error.
        Body::from_stream(stream::once(async move {
            STANDARD.decode(body).map(Bytes::from)
        }))
    } else {
        Body::from(body)
    };

    let mut http_request = Request::builder()
        .method(method)
        .uri(request_uri)
        .body(body)?;
    *http_request.headers_mut() = headers;

    let extensions = http_request.extensions_mut();
    extensions.insert(payload);
    if had_escapes {
        extensions.insert(DecodedPath(decoded_path));
    }
    if !source_ip.is_empty() {
        extensions.insert(SourceIp(source_ip));
    }

    Ok(http_request)
}

/// Build the query string. Multi-value data, when present, is used verbatim;
/// otherwise each single-value key is set once. Keys are sorted and values
/// form-encoded (space becomes `+`), matching standard URL query encoding.
fn encode_query(single: &MultiMap, multi: &MultiMap) -> String {
    let source = if multi.is_empty() { single } else { multi };

    let mut pairs: Vec<(&str, &str)> = source
        .iter()
        .flat_map(|(key, values)| values.iter().map(move |value| (key, value.as_str())))
        .collect();
    // Stable sort: values keep their order within a key.
    pairs.sort_by_key(|(key, _)| *key);

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Apply single-value headers first, then multi-value headers. A key present
/// in both gets the multi-value list wholesale; keys absent from the
/// multi-value map keep their single value.
fn build_headers(single: &MultiMap, multi: &MultiMap) -> Result<HeaderMap, EventError> {
    let mut headers = HeaderMap::new();
    for (key, values) in single.iter() {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(http::Error::from)?;
        for value in values {
            let value = HeaderValue::from_str(value).map_err(http::Error::from)?;
            headers.insert(&name, value);
        }
    }
    for (key, values) in multi.iter() {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(http::Error::from)?;
        headers.remove(&name);
        for value in values {
            let value = HeaderValue::from_str(value).map_err(http::Error::from)?;
            headers.append(&name, value);
        }
    }
    Ok(headers)
}
