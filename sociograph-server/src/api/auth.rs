//! Bearer-token authentication for the API.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};

use sociograph::models::UserId;

use crate::{error::ServerError, state::AppState};

/// The authenticated user of the current request.
///
/// Inserted into request extensions by [`auth_middleware`]; handlers
/// read it through `Extension<CurrentUser>`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let path = request.uri().path();
    if is_public_endpoint(path) {
        return Ok(next.run(request).await);
    }

    let auth_header = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(ServerError::Auth)?;

    let user = state
        .sessions
        .resolve(auth_header.token())
        .await
        .ok_or(ServerError::Auth)?;

    tracing::debug!(%user, path, "request authenticated");
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Check if an endpoint is public (doesn't require authentication)
fn is_public_endpoint(path: &str) -> bool {
    let path = path.strip_prefix("/api").unwrap_or(path);
    path == "/health" || path.starts_with("/docs") || path.starts_with("/api-docs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_and_docs_are_public() {
        assert!(is_public_endpoint("/api/health"));
        assert!(is_public_endpoint("/health"));
        assert!(is_public_endpoint("/docs/"));
        assert!(is_public_endpoint("/api-docs/openapi.json"));
    }

    #[test]
    fn relationship_routes_require_auth() {
        assert!(!is_public_endpoint("/api/relationships/pending"));
        assert!(!is_public_endpoint("/api/users/1/followers"));
    }
}
