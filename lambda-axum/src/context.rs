//! Handler-side access to the original event.
//!
//! The adapter threads the decoded payload through the request's extensions
//! rather than any ambient state: a handler asks for the original event of a
//! specific variant and gets `None` if the invocation came from a different
//! source. `axum::Extension<EventPayload>` works as an extractor too, since
//! the payload is a plain extension value.

use http::Request;
use lambda_axum_core::{
    AlbEvent, ApiGatewayV1Event, ApiGatewayV2Event, EventPayload, RequestType, SqsEvent,
    WebsocketEvent,
};

/// The logical request path when it differed from the escaped wire path.
#[derive(Debug, Clone)]
pub(crate) struct DecodedPath(pub(crate) String);

/// The client address reported by the invocation source.
#[derive(Debug, Clone)]
pub(crate) struct SourceIp(pub(crate) String);

/// Event-aware accessors on the handler's `http::Request`.
pub trait RequestExt {
    /// The original decoded event, whichever variant produced it.
    fn event_payload(&self) -> Option<&EventPayload>;

    /// The tag of the variant that produced this request.
    fn request_type(&self) -> Option<RequestType>;

    /// The original API Gateway v1 event, if this was one.
    fn api_gateway_v1_event(&self) -> Option<&ApiGatewayV1Event>;

    /// The original API Gateway v2 event, if this was one.
    fn api_gateway_v2_event(&self) -> Option<&ApiGatewayV2Event>;

    /// The original load balancer event, if this was one.
    fn alb_event(&self) -> Option<&AlbEvent>;

    /// The original websocket event, if this was one.
    fn websocket_event(&self) -> Option<&WebsocketEvent>;

    /// The original SQS event, if this was one.
    fn sqs_event(&self) -> Option<&SqsEvent>;

    /// The percent-decoded request path. Falls back to the URI path when the
    /// wire path carried no escapes.
    fn decoded_path(&self) -> &str;

    /// The client address, when the invocation source exposed one.
    fn source_ip(&self) -> Option<&str>;
}

impl<B> RequestExt for Request<B> {
    fn event_payload(&self) -> Option<&EventPayload> {
        self.extensions().get::<EventPayload>()
    }

    fn request_type(&self) -> Option<RequestType> {
        self.event_payload().map(EventPayload::request_type)
    }

    fn api_gateway_v1_event(&self) -> Option<&ApiGatewayV1Event> {
        self.event_payload().and_then(EventPayload::as_api_gateway_v1)
    }

    fn api_gateway_v2_event(&self) -> Option<&ApiGatewayV2Event> {
        self.event_payload().and_then(EventPayload::as_api_gateway_v2)
    }

    fn alb_event(&self) -> Option<&AlbEvent> {
        self.event_payload().and_then(EventPayload::as_alb)
    }

    fn websocket_event(&self) -> Option<&WebsocketEvent> {
        self.event_payload().and_then(EventPayload::as_websocket)
    }

    fn sqs_event(&self) -> Option<&SqsEvent> {
        self.event_payload().and_then(EventPayload::as_sqs)
    }

    fn decoded_path(&self) -> &str {
        self.extensions()
            .get::<DecodedPath>()
            .map(|path| path.0.as_str())
            .unwrap_or_else(|| self.uri().path())
    }

    fn source_ip(&self) -> Option<&str> {
        self.extensions().get::<SourceIp>().map(|ip| ip.0.as_str())
    }
}
