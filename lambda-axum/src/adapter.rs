//! The translation engine: payload in, wire response out.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use http::{Request, Response};
use lambda_axum_core::{EventError, LambdaResponse};
use tower::{Service, ServiceExt};

use crate::detect::detect_request_type;
use crate::normalize::normalize;
use crate::options::{Config, Options};
use crate::request::build_http_request;
use crate::response::{ResponseFormat, capture, encode_response};

/// Drives a tower service (such as an `axum::Router`) with translated
/// invocation payloads.
///
/// The adapter is stateless across invocations: configuration is finalized
/// once at construction and only read afterwards, so one adapter can serve
/// concurrent invocations.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get};
/// use lambda_axum::LambdaAdapter;
///
/// let app = Router::new().route("/", get(|| async { "hello" }));
/// let adapter = LambdaAdapter::new(app);
/// // Feed raw payloads from the runtime entry point:
/// // let response = adapter.invoke(&payload).await?;
/// ```
#[derive(Debug, Clone)]
pub struct LambdaAdapter<S> {
    service: S,
    config: Arc<Config>,
}

impl<S> LambdaAdapter<S>
where
    S: Service<Request<Body>, Response = Response<Body>, Error = Infallible> + Clone,
{
    /// Wrap `service` with default options.
    pub fn new(service: S) -> Self {
        Self::with_options(service, Options::new())
    }

    /// Wrap `service` with explicit options.
    pub fn with_options(service: S, options: Options) -> Self {
        LambdaAdapter {
            service,
            config: Arc::new(Config::from(options)),
        }
    }

    /// Translate one invocation payload, run the handler against it, and
    /// capture the wire response.
    ///
    /// Any error short of reading the response body occurs strictly before
    /// the handler is invoked.
    pub async fn handle_event(&self, payload: &[u8]) -> Result<LambdaResponse, EventError> {
        if self.config.debug_log {
            tracing::debug!(payload = %String::from_utf8_lossy(payload), "received event payload");
        }

        let request_type = detect_request_type(payload, self.config.request_type)?;
        let lambda_request = normalize(request_type, payload, &self.config)?;
        let format = ResponseFormat::for_request(&lambda_request);
        let request = build_http_request(lambda_request)?;

        let response = match self.service.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let captured = capture(response).await?;
        let encoded = encode_response(captured, format, &self.config);

        if self.config.debug_log {
            tracing::debug!(response = ?encoded, "encoded wire response");
        }
        Ok(encoded)
    }

    /// [`handle_event`](Self::handle_event) plus JSON serialization, yielding
    /// the bytes to hand back to the invoking runtime.
    pub async fn invoke(&self, payload: &[u8]) -> Result<Vec<u8>, EventError> {
        let response = self.handle_event(payload).await?;
        Ok(serde_json::to_vec(&response)?)
    }
}
