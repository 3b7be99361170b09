use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use super::{
    jwt::{JwtKeys, TokenError},
    repo::UserRepo,
    repo_types::User,
};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

/// The caller resolved from `Authorization: Bearer <token>`.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let keys = JwtKeys::from_ref(state);
        let user = resolve_identity(&keys, state.users.as_ref(), token).await?;
        Ok(AuthUser(user))
    }
}

fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let not_authenticated = || AppError::Unauthorized("Not authenticated".into());

    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(not_authenticated)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or_else(not_authenticated)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(not_authenticated());
    }
    Ok(token)
}

/// Turns a presented token into the stored user it names.
pub async fn resolve_identity(
    keys: &JwtKeys,
    users: &dyn UserRepo,
    token: &str,
) -> AppResult<User> {
    let claims = keys.verify(token).map_err(|e| {
        debug!(error = %e, "token refused");
        match e {
            TokenError::MissingSubject => AppError::Unauthorized("Invalid token payload".into()),
            TokenError::Invalid | TokenError::Expired => {
                AppError::Unauthorized("Invalid or expired token".into())
            }
        }
    })?;

    match users.find_by_username(&claims.sub).await? {
        Some(user) => Ok(user),
        None => {
            warn!(subject = %claims.sub, "token subject has no account");
            Err(AppError::Unauthorized("User not found".into()))
        }
    }
}
