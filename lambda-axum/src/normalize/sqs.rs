//! SQS queue events, translated to a synthetic `POST /sqs`.

use lambda_axum_core::{
    EventError, EventPayload, LambdaRequest, MultiMap, RequestType, SqsEvent,
};

use crate::options::Config;

pub(super) fn normalize(payload: &[u8], _config: &Config) -> Result<LambdaRequest, EventError> {
    let event: SqsEvent = serde_json::from_slice(payload)?;
    if event.records.is_empty() {
        return Err(EventError::UnexpectedSqsRequest);
    }

    let body = serde_json::to_string(&event.records)?;

    Ok(LambdaRequest {
        http_method: "POST".to_string(),
        path: "/sqs".to_string(),
        query_string_parameters: MultiMap::new(),
        multi_value_query_string_parameters: MultiMap::new(),
        headers: MultiMap::new(),
        multi_value_headers: MultiMap::new(),
        body,
        is_base64_encoded: false,
        source_ip: String::new(),
        request_type: RequestType::Sqs,
        payload: EventPayload::Sqs(event),
    })
}
