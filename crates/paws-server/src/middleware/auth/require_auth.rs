use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extract::AuthState;

/// Requires a session that resolves to a known identity.
///
/// Rejections come from the [`AuthState`] extractor: `401` for missing,
/// malformed, expired or foreign tokens. Handlers behind this layer still
/// extract [`AuthState`]; the resolved identity is cached in the request
/// extensions, so the token is verified once.
///
/// ```rust,ignore
/// use axum::middleware::from_fn_with_state;
/// use paws_server::middleware::require_authentication;
///
/// let guard = from_fn_with_state(state, require_authentication);
/// ```
pub async fn require_authentication(
    AuthState(_): AuthState,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
