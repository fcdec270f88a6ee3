//! Inbound payload shapes and the canonical request/response types.
//!
//! Each supported invocation source delivers its own JSON shape. The typed
//! structs here mirror those shapes field-for-field; the engine normalizes
//! whichever one arrives into a [`LambdaRequest`] and re-encodes the handler's
//! output as a [`LambdaResponse`] in the shape the source expects.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

use crate::multimap::MultiMap;

/// Deserialize helper treating an explicit JSON `null` as the default value.
/// Gateway payloads serialize absent bodies and parameter maps as `null`
/// rather than omitting the field.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Tag identifying which invocation source produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    /// API Gateway REST API proxy integration (the legacy v1 shape).
    ApiGatewayV1,
    /// API Gateway HTTP API with payload format version 2.0.
    ApiGatewayV2,
    /// Application load balancer target group.
    Alb,
    /// API Gateway websocket proxy.
    Websocket,
    /// SQS queue trigger, translated to a synthetic `POST /sqs`.
    Sqs,
}

/// An API Gateway REST API (v1) proxy event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiGatewayV1Event {
    pub resource: String,
    pub path: String,
    pub http_method: String,
    pub headers: MultiMap,
    pub multi_value_headers: MultiMap,
    pub query_string_parameters: MultiMap,
    pub multi_value_query_string_parameters: MultiMap,
    #[serde(deserialize_with = "null_default")]
    pub path_parameters: HashMap<String, String>,
    pub request_context: ApiGatewayV1Context,
    #[serde(deserialize_with = "null_default")]
    pub body: String,
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiGatewayV1Context {
    pub account_id: String,
    pub identity: RequestIdentity,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestIdentity {
    pub source_ip: String,
}

/// An API Gateway HTTP API (v2) event. Headers and query parameters are
/// single-value only in this shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiGatewayV2Event {
    pub version: String,
    pub headers: MultiMap,
    pub query_string_parameters: MultiMap,
    #[serde(deserialize_with = "null_default")]
    pub path_parameters: HashMap<String, String>,
    pub request_context: ApiGatewayV2Context,
    #[serde(deserialize_with = "null_default")]
    pub body: String,
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiGatewayV2Context {
    pub http: HttpDescription,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpDescription {
    pub method: String,
    pub path: String,
    pub source_ip: String,
}

/// A load balancer target group event.
///
/// Depending on the target group's "multi value headers" attribute, either
/// `headers`/`queryStringParameters` or their multi-value counterparts are
/// populated; the populated pair drives single/multi behavior for both the
/// request and the response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlbEvent {
    pub http_method: String,
    pub path: String,
    pub headers: MultiMap,
    pub multi_value_headers: MultiMap,
    pub query_string_parameters: MultiMap,
    pub multi_value_query_string_parameters: MultiMap,
    pub request_context: AlbContext,
    #[serde(deserialize_with = "null_default")]
    pub body: String,
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlbContext {
    pub elb: ElbContext,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElbContext {
    pub target_group_arn: String,
}

/// An API Gateway websocket proxy event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebsocketEvent {
    pub path: String,
    pub http_method: String,
    pub headers: MultiMap,
    pub multi_value_headers: MultiMap,
    pub query_string_parameters: MultiMap,
    pub multi_value_query_string_parameters: MultiMap,
    #[serde(deserialize_with = "null_default")]
    pub path_parameters: HashMap<String, String>,
    pub request_context: WebsocketContext,
    #[serde(deserialize_with = "null_default")]
    pub body: String,
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebsocketContext {
    pub api_id: String,
    pub event_type: String,
    pub connection_id: String,
    pub identity: RequestIdentity,
}

/// An SQS event. Records are kept as raw JSON; the handler receives them as
/// the body of a synthetic `POST /sqs` request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SqsEvent {
    #[serde(rename = "Records")]
    pub records: Vec<serde_json::Value>,
}

/// The original decoded event, retained for handler-side retrieval.
///
/// The payload travels in the HTTP request's extensions, so a handler can ask
/// for "the original websocket event, if this was a websocket invocation"
/// without any ambient state.
#[derive(Debug, Clone)]
pub enum EventPayload {
    ApiGatewayV1(ApiGatewayV1Event),
    ApiGatewayV2(ApiGatewayV2Event),
    Alb(AlbEvent),
    Websocket(WebsocketEvent),
    Sqs(SqsEvent),
}

impl EventPayload {
    /// The tag of the variant that produced this payload.
    pub fn request_type(&self) -> RequestType {
        match self {
            EventPayload::ApiGatewayV1(_) => RequestType::ApiGatewayV1,
            EventPayload::ApiGatewayV2(_) => RequestType::ApiGatewayV2,
            EventPayload::Alb(_) => RequestType::Alb,
            EventPayload::Websocket(_) => RequestType::Websocket,
            EventPayload::Sqs(_) => RequestType::Sqs,
        }
    }

    /// The original event if this was an API Gateway v1 invocation.
    pub fn as_api_gateway_v1(&self) -> Option<&ApiGatewayV1Event> {
        match self {
            EventPayload::ApiGatewayV1(event) => Some(event),
            _ => None,
        }
    }

    /// The original event if this was an API Gateway v2 invocation.
    pub fn as_api_gateway_v2(&self) -> Option<&ApiGatewayV2Event> {
        match self {
            EventPayload::ApiGatewayV2(event) => Some(event),
            _ => None,
        }
    }

    /// The original event if this was a load balancer invocation.
    pub fn as_alb(&self) -> Option<&AlbEvent> {
        match self {
            EventPayload::Alb(event) => Some(event),
            _ => None,
        }
    }

    /// The original event if this was a websocket invocation.
    pub fn as_websocket(&self) -> Option<&WebsocketEvent> {
        match self {
            EventPayload::Websocket(event) => Some(event),
            _ => None,
        }
    }

    /// The original event if this was an SQS invocation.
    pub fn as_sqs(&self) -> Option<&SqsEvent> {
        match self {
            EventPayload::Sqs(event) => Some(event),
            _ => None,
        }
    }
}

/// The canonical, format-neutral form of any supported invocation payload.
///
/// Built once per invocation by a variant normalizer and consumed by the
/// request builder. Where both the single- and multi-value maps are
/// populated, the multi-value data wins per key and single-value data fills
/// the gaps; the builder applies that precedence.
#[derive(Debug, Clone)]
pub struct LambdaRequest {
    /// HTTP method; an empty string means GET.
    pub http_method: String,
    /// Request path, still percent-escaped as it arrived.
    pub path: String,
    pub query_string_parameters: MultiMap,
    pub multi_value_query_string_parameters: MultiMap,
    pub headers: MultiMap,
    pub multi_value_headers: MultiMap,
    /// Raw body string, possibly base64-encoded.
    pub body: String,
    pub is_base64_encoded: bool,
    /// Client address, empty when the variant does not expose one.
    pub source_ip: String,
    pub request_type: RequestType,
    /// The original decoded event, kept for handler-side retrieval.
    pub payload: EventPayload,
}

/// The wire response sent back to the invocation source.
///
/// Which of the two header maps is populated mirrors the inbound shape:
/// multi-value-capable sources get `multiValueHeaders` verbatim, single-value
/// sources get `headers` with duplicates flattened via binary-case keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaResponse {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_value_headers: Option<BTreeMap<String, Vec<String>>>,
    pub body: String,
    pub is_base64_encoded: bool,
}
