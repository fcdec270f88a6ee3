//! Adapter configuration.

use std::collections::{HashMap, HashSet};

use lambda_axum_core::RequestType;

/// Content-Type value matching any content type.
pub(crate) const ACCEPT_ALL_CONTENT_TYPE: &str = "*/*";
/// Content-Encoding value matching any content encoding.
pub(crate) const ACCEPT_ALL_CONTENT_ENCODING: &str = "*";

/// A method/path pair substituted for a websocket event type.
///
/// Lets a single websocket connection multiplex onto several virtual HTTP
/// endpoints: each gateway event type (`CONNECT`, `MESSAGE`, `DISCONNECT`, or
/// a custom route) can be mapped to its own method and path.
#[derive(Debug, Clone)]
pub struct ActionOverride {
    pub http_method: String,
    pub path: String,
}

impl ActionOverride {
    pub fn new(http_method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            path: path.into(),
        }
    }
}

/// Optional adapter parameters.
///
/// # Example
///
/// ```ignore
/// use lambda_axum::Options;
///
/// let options = Options::new()
///     .binary_content_types(["image/png", "application/octet-stream"])
///     .use_proxy_path(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    request_type: Option<RequestType>,
    binary_content_types: Vec<String>,
    binary_content_encodings: Vec<String>,
    use_proxy_path: bool,
    websocket_action_overrides: HashMap<String, ActionOverride>,
    debug_log: bool,
}

impl Options {
    /// Create default options: auto-detected request type, no binary content
    /// types or encodings, no proxy path, no websocket overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip payload detection and always treat events as `request_type`.
    ///
    /// Payloads whose discriminator fields do not match the forced type fail
    /// with the type-specific mismatch error instead of being reinterpreted.
    pub fn request_type(mut self, request_type: RequestType) -> Self {
        self.request_type = Some(request_type);
        self
    }

    /// Content types whose response bodies are base64-encoded on the wire.
    /// `"*/*"` treats every response as binary.
    pub fn binary_content_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.binary_content_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Content encodings whose response bodies are base64-encoded on the
    /// wire. `"*"` treats every encoded response as binary.
    pub fn binary_content_encodings<I, S>(mut self, encodings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.binary_content_encodings = encodings.into_iter().map(Into::into).collect();
        self
    }

    /// Build the request path from the `proxy` path parameter instead of the
    /// payload path. Strips the base path mapping when API Gateway fronts a
    /// custom domain.
    pub fn use_proxy_path(mut self, enabled: bool) -> Self {
        self.use_proxy_path = enabled;
        self
    }

    /// Map a websocket event type to a method and path override. The event
    /// type is matched case-insensitively.
    pub fn websocket_action_override(
        mut self,
        event_type: impl Into<String>,
        action: ActionOverride,
    ) -> Self {
        self.websocket_action_overrides
            .insert(event_type.into(), action);
        self
    }

    /// Emit the raw payload and encoded response at debug level. Diagnostics
    /// only; no behavioral effect.
    pub fn debug_log(mut self, enabled: bool) -> Self {
        self.debug_log = enabled;
        self
    }
}

/// Finalized configuration with the derived lookup structures built.
///
/// Constructed once per adapter and read-only afterwards, so concurrent
/// invocations of the same adapter share it freely.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) request_type: Option<RequestType>,
    pub(crate) binary_content_types: HashSet<String>,
    pub(crate) binary_content_encodings: HashSet<String>,
    pub(crate) use_proxy_path: bool,
    /// Keys lowercased for case-insensitive event-type matching.
    pub(crate) websocket_action_overrides: HashMap<String, ActionOverride>,
    pub(crate) debug_log: bool,
}

impl From<Options> for Config {
    fn from(options: Options) -> Self {
        Config {
            request_type: options.request_type,
            binary_content_types: options.binary_content_types.into_iter().collect(),
            binary_content_encodings: options.binary_content_encodings.into_iter().collect(),
            use_proxy_path: options.use_proxy_path,
            websocket_action_overrides: options
                .websocket_action_overrides
                .into_iter()
                .map(|(event_type, action)| (event_type.to_lowercase(), action))
                .collect(),
            debug_log: options.debug_log,
        }
    }
}
