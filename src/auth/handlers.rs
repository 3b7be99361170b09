use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, RegisterRequest, TokenResponse},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{burn_verify, hash_password, verify_password},
        repo_types::NewUser,
    },
    common::extract::JsonBody,
    error::{AppError, AppResult},
    state::AppState,
};

const DUPLICATE_USER: &str = "Username or Email already registered";
const BAD_CREDENTIALS: &str = "Invalid username or password";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let reg = payload.validate()?;

    // one combined lookup; which field collided is not disclosed
    if state
        .users
        .find_by_username_or_email(&reg.username, &reg.email)
        .await?
        .is_some()
    {
        warn!(username = %reg.username, "username or email already registered");
        return Err(AppError::Conflict(DUPLICATE_USER.into()));
    }

    let password_hash = hash_password(&reg.password)?;

    let created = state
        .users
        .create(NewUser {
            first_name: reg.first_name,
            last_name: reg.last_name,
            username: reg.username,
            password_hash,
            email: reg.email,
            role: reg.role,
            avatar: reg.avatar,
        })
        .await?;

    let Some(user) = created else {
        warn!("concurrent registration won the unique constraint");
        return Err(AppError::Conflict(DUPLICATE_USER.into()));
    };

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let username = payload.username.trim();

    let user = match state.users.find_by_username(username).await? {
        Some(u) if verify_password(&payload.password, &u.password_hash) => Some(u),
        Some(_) => None,
        None => {
            burn_verify(&payload.password);
            None
        }
    };

    let Some(user) = user else {
        warn!(%username, "login rejected");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    };

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user.username)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(TokenResponse::bearer(access_token)))
}

#[instrument(skip_all)]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(PublicUser::from(user))
}
