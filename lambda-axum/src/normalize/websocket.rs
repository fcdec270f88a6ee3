//! API Gateway websocket proxy events.

use lambda_axum_core::{EventError, EventPayload, LambdaRequest, RequestType, WebsocketEvent};

use super::proxy_path;
use crate::options::Config;

pub(super) fn normalize(payload: &[u8], config: &Config) -> Result<LambdaRequest, EventError> {
    let mut event: WebsocketEvent = serde_json::from_slice(payload)?;
    let context = &event.request_context;
    if context.api_id.is_empty() || context.event_type.is_empty() {
        return Err(EventError::UnexpectedWebsocketRequest);
    }

    // An override maps the gateway event type onto a virtual HTTP endpoint,
    // letting one websocket connection multiplex across several routes. The
    // connection id rides along as a synthetic header so the overridden
    // route can still address the connection.
    let mut overridden = false;
    let event_type = context.event_type.to_lowercase();
    if let Some(action) = config.websocket_action_overrides.get(&event_type) {
        let connection_id = event.request_context.connection_id.clone();
        event.path = action.path.clone();
        event.http_method = action.http_method.clone();
        event.headers.insert("Connection-Id", vec![connection_id]);
        overridden = true;
    }

    let path = if config.use_proxy_path && !overridden {
        proxy_path(&event.path_parameters)
    } else {
        event.path.clone()
    };

    Ok(LambdaRequest {
        http_method: event.http_method.clone(),
        path,
        query_string_parameters: event.query_string_parameters.clone(),
        multi_value_query_string_parameters: event
            .multi_value_query_string_parameters
            .clone(),
        headers: event.headers.clone(),
        multi_value_headers: event.multi_value_headers.clone(),
        body: event.body.clone(),
        is_base64_encoded: event.is_base64_encoded,
        source_ip: event.request_context.identity.source_ip.clone(),
        request_type: RequestType::Websocket,
        payload: EventPayload::Websocket(event),
    })
}
