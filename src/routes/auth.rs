use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::db::users;
use crate::error::AppError;
use crate::models::User;
use crate::security::verify_token;
use crate::AppState;

/// The logged-in user, resolved from an `Authorization: Bearer <token>` header
///
/// Rejects with 401 when the header is missing, the token fails verification, or the
/// user it names no longer exists. Wrap in `Option` for endpoints where login is optional.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or(AppError::Unauthorized)?;

        let user_id =
            verify_token(token, &state.config.token_secret).ok_or(AppError::Unauthorized)?;

        let user = users::get_user_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Token for unknown user {}", user_id);
                AppError::Unauthorized
            })?;

        Ok(AuthUser(user))
    }
}
