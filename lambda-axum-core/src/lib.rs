//! Core event types for lambda-axum.
//!
//! This crate provides the shared building blocks used by the `lambda-axum`
//! translation engine:
//!
//! - [`MultiMap`]: an ordered, case-insensitive multi-value map for headers
//!   and query parameters
//! - [`binary_case`] and [`canonical_header_key`]: header-name spellings
//! - [`path_unescape`]: strict percent-escape decoding for request paths
//! - the inbound payload shapes, the canonical [`LambdaRequest`], and the
//!   wire [`LambdaResponse`]
//! - [`EventError`]: the error taxonomy shared across detection,
//!   normalization and encoding

mod case;
mod error;
mod escape;
mod event;
mod multimap;

pub use case::*;
pub use error::*;
pub use escape::*;
pub use event::*;
pub use multimap::*;
