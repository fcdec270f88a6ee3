//! # lambda-axum
//!
//! Run [axum](https://github.com/tokio-rs/axum) (or any tower) HTTP handlers
//! behind serverless event sources without changing the handler.
//!
//! Invocation payloads from API Gateway (REST and HTTP APIs), application
//! load balancer target groups, websocket gateways and SQS queues all encode
//! an HTTP-like request, each in its own JSON shape. This crate detects
//! which shape arrived, normalizes it into a regular `http::Request`, drives
//! the handler, and re-encodes the response in the shape the source expects
//! — including the alternate-case header spellings needed when a wire
//! format allows only one value per header name.
//!
//! The adapter performs no network I/O and no routing of its own; it is a
//! pure in-memory translation layer between a runtime entry point and a
//! handler.
//!
//! ## Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use lambda_axum::{LambdaAdapter, Options};
//!
//! let app = Router::new().route("/hello", get(|| async { "hi" }));
//! let adapter = LambdaAdapter::with_options(
//!     app,
//!     Options::new().binary_content_types(["image/png"]),
//! );
//! ```
//!
//! Handlers can recover the original event through [`RequestExt`] or an
//! `axum::Extension<EventPayload>` extractor.

mod adapter;
mod context;
mod detect;
mod normalize;
mod options;
mod request;
mod response;

pub use adapter::LambdaAdapter;
pub use context::RequestExt;
pub use options::{ActionOverride, Options};

// Re-export the core event types so handlers only need this crate.
pub use lambda_axum_core::{
    AlbEvent, ApiGatewayV1Event, ApiGatewayV2Event, EscapeError, EventError, EventPayload,
    LambdaRequest, LambdaResponse, MultiMap, RequestType, SqsEvent, WebsocketEvent, binary_case,
    canonical_header_key, path_unescape,
};

pub mod prelude {
    //! The most common types in one import.
    pub use crate::{
        ActionOverride, EventError, EventPayload, LambdaAdapter, LambdaResponse, Options,
        RequestExt, RequestType,
    };
}
