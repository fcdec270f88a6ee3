//! Response capture and wire encoding.
//!
//! The capturer stands in for a live connection: the handler's response is
//! drained into memory (status, header list with duplicates in arrival
//! order, full body) and then encoded into the wire shape the invocation
//! source expects.

use std::collections::{BTreeMap, HashMap};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http::{HeaderName, HeaderValue, Response, StatusCode, header};
use http_body_util::BodyExt;
use lambda_axum_core::{
    EventError, LambdaRequest, LambdaResponse, RequestType, binary_case, canonical_header_key,
};

use crate::options::{ACCEPT_ALL_CONTENT_ENCODING, ACCEPT_ALL_CONTENT_TYPE, Config};

/// How the wire response encodes its headers, decided from the inbound shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResponseFormat {
    /// Key to list-of-values map, no flattening needed.
    MultiValue,
    /// One value per key; duplicates flattened through binary-case spellings.
    SingleValue,
    /// Status and body only (queue sources have no header channel).
    StatusOnly,
}

impl ResponseFormat {
    pub(crate) fn for_request(request: &LambdaRequest) -> Self {
        match request.request_type {
            RequestType::ApiGatewayV2 => ResponseFormat::MultiValue,
            // A target group mirrors whichever header shape it sent.
            RequestType::Alb if !request.multi_value_headers.is_empty() => {
                ResponseFormat::MultiValue
            }
            RequestType::Alb => ResponseFormat::SingleValue,
            RequestType::ApiGatewayV1 | RequestType::Websocket => ResponseFormat::SingleValue,
            RequestType::Sqs => ResponseFormat::StatusOnly,
        }
    }
}

/// Everything the handler wrote, drained into memory.
pub(crate) struct CapturedResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: Vec<(HeaderName, HeaderValue)>,
    pub(crate) body: Bytes,
}

/// Drain the handler's response. Blocks until the body is fully collected;
/// there are no timeout or partial-flush semantics.
pub(crate) async fn capture(
    response: Response<axum::body::Body>,
) -> Result<CapturedResponse, EventError> {
    let (parts, body) = response.into_parts();
    let body = body
        .collect()
        .await
        .map_err(|err| EventError::ResponseBody(err.to_string()))?
        .to_bytes();
    let headers = parts
        .headers
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    Ok(CapturedResponse {
        status: parts.status,
        headers,
        body,
    })
}

/// Encode the captured response into the wire shape for `format`.
pub(crate) fn encode_response(
    captured: CapturedResponse,
    format: ResponseFormat,
    config: &Config,
) -> LambdaResponse {
    let mut response = LambdaResponse {
        status_code: captured.status.as_u16(),
        ..Default::default()
    };

    match format {
        ResponseFormat::MultiValue => {
            response.multi_value_headers = Some(multi_value_headers(&captured.headers));
        }
        ResponseFormat::SingleValue => {
            response.headers = Some(flattened_headers(&captured.headers));
        }
        ResponseFormat::StatusOnly => {}
    }

    if is_binary(&captured.headers, config) {
        response.body = STANDARD.encode(&captured.body);
        response.is_base64_encoded = true;
    } else {
        response.body = String::from_utf8_lossy(&captured.body).into_owned();
    }

    response
}

/// Whether the body must travel base64-encoded, decided once per response
/// from the configured binary content types and encodings.
fn is_binary(headers: &[(HeaderName, HeaderValue)], config: &Config) -> bool {
    let types = &config.binary_content_types;
    let encodings = &config.binary_content_encodings;

    types.contains(ACCEPT_ALL_CONTENT_TYPE)
        || first_value(headers, &header::CONTENT_TYPE)
            .is_some_and(|content_type| types.contains(content_type))
        || encodings.contains(ACCEPT_ALL_CONTENT_ENCODING)
        || first_value(headers, &header::CONTENT_ENCODING)
            .is_some_and(|content_encoding| encodings.contains(content_encoding))
}

fn first_value<'a>(headers: &'a [(HeaderName, HeaderValue)], name: &HeaderName) -> Option<&'a str> {
    headers
        .iter()
        .find(|(candidate, _)| candidate == name)
        .and_then(|(_, value)| value.to_str().ok())
}

fn multi_value_headers(
    headers: &[(HeaderName, HeaderValue)],
) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        map.entry(canonical_header_key(name.as_str()))
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}

/// Flatten to one value per key. The k-th occurrence of a name is emitted
/// under `binary_case(name, k)`, an alternate-case spelling that is a
/// distinct map key but the same header for any case-insensitive client.
fn flattened_headers(headers: &[(HeaderName, HeaderValue)]) -> BTreeMap<String, String> {
    let mut occurrences: HashMap<&str, u32> = HashMap::new();
    let mut map = BTreeMap::new();
    for (name, value) in headers {
        let index = occurrences.entry(name.as_str()).or_insert(0);
        map.insert(
            binary_case(&canonical_header_key(name.as_str()), *index),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
        *index += 1;
    }
    map
}
