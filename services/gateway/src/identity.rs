//! Actor identity extraction
//!
//! Authentication happens upstream (reverse proxy / auth service); by the
//! time a request reaches the gateway its identity is already resolved and
//! carried in trusted headers. This extractor only reads them — there is
//! no token verification in the core, by design.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use types::identity::Identity;
use types::ids::UserId;
use uuid::Uuid;

use crate::error::AppError;

/// Pre-validated user id header set by the auth proxy.
pub const USER_ID_HEADER: &str = "x-league-user-id";
/// Profile display name; may be absent or blank (team naming falls back).
pub const USER_NAME_HEADER: &str = "x-league-user-name";
/// Role header; the literal `admin` grants scoring/catalog rights.
pub const USER_ROLE_HEADER: &str = "x-league-user-role";

/// The resolved caller of a request.
pub struct CallerIdentity(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing resolved identity".to_string()))?;
        let user_id = Uuid::parse_str(raw_id)
            .map(UserId::from_uuid)
            .map_err(|_| AppError::Unauthorized("malformed user id".to_string()))?;

        let display_name = parts
            .headers
            .get(USER_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let is_admin = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|role| role.eq_ignore_ascii_case("admin"))
            .unwrap_or(false);

        Ok(CallerIdentity(Identity::new(user_id, display_name, is_admin)))
    }
}

/// Gate for scoring and catalog administration endpoints.
pub fn require_admin(identity: &Identity) -> Result<(), AppError> {
    if identity.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "scoring administration requires the admin role".to_string(),
        ))
    }
}
