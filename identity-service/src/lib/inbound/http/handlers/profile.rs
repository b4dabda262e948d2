use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::models::AuthenticatedIdentity;

/// Returns the verified claims the guard attached to this request.
pub async fn profile(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&identity).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub id: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<&AuthenticatedIdentity> for ProfileResponseData {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            id: identity.subject.to_string(),
            username: identity.identifier.clone(),
            issued_at: identity.issued_at,
            expires_at: identity.expires_at,
        }
    }
}
