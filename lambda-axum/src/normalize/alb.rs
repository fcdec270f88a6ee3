//! Load balancer target group events.

use lambda_axum_core::{AlbEvent, EventError, EventPayload, LambdaRequest, RequestType};

use crate::options::Config;

/// The first address in the `x-forwarded-for` chain, read from whichever
/// header map the target group populated. Target group events carry no
/// identity block, so this is the only source-IP signal available.
fn source_ip(event: &AlbEvent) -> String {
    event
        .multi_value_headers
        .first("x-forwarded-for")
        .or_else(|| event.headers.first("x-forwarded-for"))
        .and_then(|chain| chain.split(',').next())
        .map(|ip| ip.trim().to_string())
        .unwrap_or_default()
}

pub(super) fn normalize(payload: &[u8], _config: &Config) -> Result<LambdaRequest, EventError> {
    let event: AlbEvent = serde_json::from_slice(payload)?;
    if event.request_context.elb.target_group_arn.is_empty() {
        return Err(EventError::UnexpectedAlbRequest);
    }

    Ok(LambdaRequest {
        http_method: event.http_method.clone(),
        // Target group events deliver the path as-is; there are no path
        // parameters to strip or substitute.
        path: event.path.clone(),
        query_string_parameters: event.query_string_parameters.clone(),
        multi_value_query_string_parameters: event
            .multi_value_query_string_parameters
            .clone(),
        headers: event.headers.clone(),
        multi_value_headers: event.multi_value_headers.clone(),
        body: event.body.clone(),
        is_base64_encoded: event.is_base64_encoded,
        source_ip: source_ip(&event),
        request_type: RequestType::Alb,
        payload: EventPayload::Alb(event),
    })
}
