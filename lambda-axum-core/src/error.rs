//! Error taxonomy for event translation.
//!
//! Every error here is terminal for the current invocation: an invocation
//! either fully succeeds (handler ran, response encoded) or fails before the
//! handler runs. The only post-handler failure is reading the response body.

use crate::escape::EscapeError;

/// Errors produced while translating an invocation payload.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The raw payload is not valid JSON.
    #[error("failed to decode event payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The payload decoded but matches none of the supported event shapes.
    #[error("unrecognized event payload")]
    UnrecognizedPayload,

    /// A load balancer event arrived without multi-value headers.
    ///
    /// Auto-detected target group events are only supported with the
    /// "multi value headers" attribute enabled on the target group.
    #[error("expected multi value headers; enable multi value headers in target group settings")]
    MultiValueHeadersRequired,

    /// The payload is not an API Gateway proxy event.
    #[error("expected an API Gateway proxy event")]
    UnexpectedApiGatewayV1Request,

    /// The payload is not an API Gateway HTTP API (v2) event.
    #[error("expected an API Gateway v2 HTTP event")]
    UnexpectedApiGatewayV2Request,

    /// The payload is not a load balancer target group event.
    #[error("expected a target group event")]
    UnexpectedAlbRequest,

    /// The payload is not an API Gateway websocket proxy event.
    #[error("expected an API Gateway websocket proxy event")]
    UnexpectedWebsocketRequest,

    /// The payload is not an SQS event.
    #[error("expected an SQS event")]
    UnexpectedSqsRequest,

    /// The request path carries malformed percent-encoding.
    #[error("invalid request path: {0}")]
    InvalidPath(#[from] EscapeError),

    /// The canonical fields do not form a valid HTTP request.
    #[error("failed to build http request: {0}")]
    InvalidRequest(#[from] http::Error),

    /// The handler's response body could not be read.
    #[error("failed to read response body: {0}")]
    ResponseBody(String),
}
