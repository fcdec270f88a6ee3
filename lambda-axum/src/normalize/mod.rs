//! Variant normalizers.
//!
//! One module per invocation source shape, each deserializing its typed event
//! and producing the canonical [`LambdaRequest`]. Every normalizer re-checks
//! its own discriminator field even though the detector already did — a
//! forced request type reaches the normalizer without any detection.

mod alb;
mod api_gateway;
mod http_api;
mod sqs;
mod websocket;

use std::collections::HashMap;

use lambda_axum_core::{EventError, LambdaRequest, RequestType};

use crate::options::Config;

/// Normalize `payload` according to the detected (or forced) request type.
pub(crate) fn normalize(
    request_type: RequestType,
    payload: &[u8],
    config: &Config,
) -> Result<LambdaRequest, EventError> {
    match request_type {
        RequestType::ApiGatewayV1 => api_gateway::normalize(payload, config),
        RequestType::ApiGatewayV2 => http_api::normalize(payload, config),
        RequestType::Alb => alb::normalize(payload, config),
        RequestType::Websocket => websocket::normalize(payload, config),
        RequestType::Sqs => sqs::normalize(payload, config),
    }
}

/// `/` joined with the `proxy` path parameter, used to strip a custom-domain
/// base path mapping. Empty segments are dropped, so leading, trailing and
/// repeated slashes all collapse.
fn proxy_path(path_parameters: &HashMap<String, String>) -> String {
    let proxy = path_parameters
        .get("proxy")
        .map(String::as_str)
        .unwrap_or("");
    let segments: Vec<&str> = proxy.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Replace every `{name}` (and greedy `{name+}`) placeholder with the
/// matching path parameter value.
fn replace_path_parameters(template: &str, path_parameters: &HashMap<String, String>) -> String {
    let mut path = template.to_string();
    for (name, value) in path_parameters {
        path = path.replace(&format!("{{{name}}}"), value);
        path = path.replace(&format!("{{{name}+}}"), value);
    }
    path
}
