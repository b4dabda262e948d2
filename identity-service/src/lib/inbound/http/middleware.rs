use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Guard that validates the bearer token and adds the verified identity to
/// the request extensions.
///
/// The extension is dropped with the request; nothing is cached across
/// requests.
pub async fn authenticate<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers());

    let identity = state.auth_service.authorize(token).map_err(|e| {
        tracing::warn!(error = %e, uri = %req.uri(), "Request rejected by guard");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// Any other scheme, or an unreadable header, counts as no credential.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
