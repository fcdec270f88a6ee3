//! API Gateway REST API (v1) proxy events.

use lambda_axum_core::{ApiGatewayV1Event, EventError, EventPayload, LambdaRequest, RequestType};

use super::{proxy_path, replace_path_parameters};
use crate::options::Config;

pub(super) fn normalize(payload: &[u8], config: &Config) -> Result<LambdaRequest, EventError> {
    let event: ApiGatewayV1Event = serde_json::from_slice(payload)?;
    if event.request_context.account_id.is_empty() {
        return Err(EventError::UnexpectedApiGatewayV1Request);
    }

    let path = if config.use_proxy_path {
        proxy_path(&event.path_parameters)
    } else {
        // Console test invocations deliver the resource template in the path
        // field; replacing placeholders covers both that case and real
        // invocations, where the path is already literal.
        let template = if event.path.is_empty() {
            &event.resource
        } else {
            &event.path
        };
        replace_path_parameters(template, &event.path_parameters)
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
        request_type: RequestType::ApiGatewayV1,
        payload: EventPayload::ApiGatewayV1(event),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_event() -> serde_json::Value {
        json!({
            "resource": "/users/{id}",
            "path": "/users/{id}",
            "httpMethod": "DELETE",
            "pathParameters": {"id": "42", "proxy": "users/42"},
            "requestContext": {
                "accountId": "123456789012",
                "identity": {"sourceIp": "10.1.2.3"}
            },
            "body": "",
            "isBase64Encoded": false
        })
    }

    #[test]
    fn test_normalize_replaces_placeholders() {
        let request =
            normalize(base_event().to_string().as_bytes(), &Config::from(crate::Options::new()))
                .unwrap();

        assert_eq!(request.path, "/users/42");
        assert_eq!(request.http_method, "DELETE");
        assert_eq!(request.source_ip, "10.1.2.3");
        assert_eq!(request.request_type, RequestType::ApiGatewayV1);
        assert!(request.payload.as_api_gateway_v1().is_some());
    }

    #[test]
    fn test_normalize_proxy_path() {
        let config = Config::from(crate::Options::new().use_proxy_path(true));
        let request = normalize(base_event().to_string().as_bytes(), &config).unwrap();

        assert_eq!(request.path, "/users/42");
    }

    #[test]
    fn test_normalize_rejects_missing_discriminator() {
        let payload = json!({"path": "/", "httpMethod": "GET"});
        let result = normalize(
            payload.to_string().as_bytes(),
            &Config::from(crate::Options::new()),
        );

        assert!(matches!(
            result,
            Err(EventError::UnexpectedApiGatewayV1Request)
        ));
    }
}
