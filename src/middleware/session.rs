use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use uuid::Uuid;

/// HTTP header carrying the browser session ID
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Identifies the browser session a request belongs to
///
/// Handlers take it as an extractor. It resolves to the ID attached by
/// [`session_middleware`], then to a valid `x-session-id` header, and
/// finally to a fresh ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Session named by the `x-session-id` header, if it holds a UUID
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(SESSION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .map(Self)
    }

    fn header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.to_string()).ok()
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<SessionId>() {
            return Ok(*session);
        }
        Ok(Self::from_headers(&parts.headers).unwrap_or_default())
    }
}

/// Resolves the session once per request and echoes it back
///
/// Browsers keep their selection by resending the echoed header. Requests
/// without a usable header start a new session.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let session = SessionId::from_headers(request.headers()).unwrap_or_default();
    request.extensions_mut().insert(session);

    let mut response = next.run(request).await;
    if let Some(value) = session.header_value() {
        response.headers_mut().insert(SESSION_ID_HEADER, value);
    }
    response
}

/// Per-request tracing span tagged with the session
pub fn make_span_with_session_id(request: &Request<Body>) -> tracing::Span {
    let session = request
        .extensions()
        .get::<SessionId>()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        session_id = %session,
    )
}
