//! Request-variant detection.
//!
//! The detector inspects only the documented discriminator fields of the
//! decoded payload; everything else is left to the variant normalizers. A
//! forced request type bypasses detection entirely — the normalizer's own
//! discriminator check then reports a mismatch instead of the payload being
//! silently reinterpreted.

use lambda_axum_core::{EventError, MultiMap, RequestType, null_default};
use serde::Deserialize;

/// The discriminator fields shared across all supported payload shapes.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EventProbe {
    version: String,
    multi_value_headers: MultiMap,
    request_context: ProbeContext,
    #[serde(rename = "Records", deserialize_with = "null_default")]
    records: Vec<ProbeRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProbeContext {
    account_id: String,
    event_type: String,
    elb: ProbeElb,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProbeElb {
    target_group_arn: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProbeRecord {
    event_source: String,
}

/// Decide which invocation source shape `payload` matches.
///
/// With a forced type the payload is not inspected here at all; the matching
/// normalizer enforces the discriminator. Otherwise the discriminators are
/// evaluated in priority order: websocket, HTTP API v2, load balancer,
/// API Gateway v1, SQS.
pub(crate) fn detect_request_type(
    payload: &[u8],
    forced: Option<RequestType>,
) -> Result<RequestType, EventError> {
    if let Some(request_type) = forced {
        return Ok(request_type);
    }

    let probe: EventProbe = serde_json::from_slice(payload)?;
    let context = &probe.request_context;

    if !context.event_type.is_empty() {
        return Ok(RequestType::Websocket);
    }
    if probe.version == "2.0" {
        return Ok(RequestType::ApiGatewayV2);
    }
    if !context.elb.target_group_arn.is_empty() {
        // Auto-detected target group events are only supported with the
        // multi-value headers attribute enabled upstream; force
        // RequestType::Alb to accept single-value events.
        if probe.multi_value_headers.is_empty() {
            return Err(EventError::MultiValueHeadersRequired);
        }
        return Ok(RequestType::Alb);
    }
    if !context.account_id.is_empty() {
        return Ok(RequestType::ApiGatewayV1);
    }
    if probe
        .records
        .first()
        .is_some_and(|record| record.event_source == "aws:sqs")
    {
        return Ok(RequestType::Sqs);
    }

    Err(EventError::UnrecognizedPayload)
}
