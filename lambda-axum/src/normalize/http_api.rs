//! API Gateway HTTP API (v2) events.

use lambda_axum_core::{
    ApiGatewayV2Event, EventError, EventPayload, LambdaRequest, MultiMap, RequestType,
};

use super::proxy_path;
use crate::options::Config;

pub(super) fn normalize(payload: &[u8], config: &Config) -> Result<LambdaRequest, EventError> {
    let event: ApiGatewayV2Event = serde_json::from_slice(payload)?;
    if event.version != "2.0" {
        return Err(EventError::UnexpectedApiGatewayV2Request);
    }

    let path = if config.use_proxy_path {
        proxy_path(&event.path_parameters)
    } else {
        event.request_context.http.path.clone()
    };

    Ok(LambdaRequest {
        http_method: event.request_context.http.method.clone(),
        path,
        query_string_parameters: event.query_string_parameters.clone(),
        // The v2 shape is single-value only.
        multi_value_query_string_parameters: MultiMap::new(),
        headers: event.headers.clone(),
        multi_value_headers: MultiMap::new(),
        body: event.body.clone(),
        is_base64_encoded: event.is_base64_encoded,
        source_ip: event.request_context.http.source_ip.clone(),
        request_type: RequestType::ApiGatewayV2,
        payload: EventPayload::ApiGatewayV2(event),
    })
}
