//! `AuthUser` extractor — reads the identity forwarded by the workspace
//! gateway and injects a [`Principal`] into handlers.
//!
//! Authentication itself happens upstream; this service trusts the
//! `x-user-id` header the gateway sets after validating the session.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use bespire_core::error::AppError;
use bespire_service::context::Principal;

use crate::state::AppState;

/// Extracted acting user available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    /// Returns the inner `Principal`.
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing x-user-id header"))?
            .parse::<Uuid>()
            .map_err(|_| AppError::unauthorized("Invalid x-user-id header"))?;

        let display_name = parts
            .headers
            .get("x-user-name")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(AuthUser(Principal::new(user_id, display_name)))
    }
}
