use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::db::{routines, users};
use crate::error::{AppError, Result};
use crate::models::{Credentials, DecoratedRoutine, User};
use crate::routes::AuthUser;
use crate::security::{hash_password, issue_token, verify_password};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

/// Register a new user
///
/// Passwords shorter than the minimum length are rejected with 400 and a taken
/// username with 409. The response carries a token so the client is logged in.
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<AuthResponse>> {
    payload
        .validate_for_registration()
        .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;

    let username = payload.username.trim();
    let password_hash = hash_password(payload.password, state.config.bcrypt_cost).await?;

    let user = users::create_user(&state.db, username, &password_hash)
        .await
        .map_err(|e| AppError::on_unique_violation(e, AppError::UserAlreadyExists))?;

    tracing::info!("New user registered: {}", user.id);

    let token = issue_token(
        user.id,
        state.config.token_ttl_secs,
        &state.config.token_secret,
    )?;

    Ok(Json(AuthResponse {
        message: "Thanks for signing up!".to_string(),
        user,
        token,
    }))
}

/// Exchange a username and password for a bearer token
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<AuthResponse>> {
    let username = payload.username.trim();
    let user = users::get_user_by_username(&state.db, username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(payload.password, user.password.clone()).await? {
        tracing::warn!("Failed login for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(
        user.id,
        state.config.token_ttl_secs,
        &state.config.token_secret,
    )?;

    Ok(Json(AuthResponse {
        message: "You're logged in!".to_string(),
        user,
        token,
    }))
}

/// The user the request's token belongs to
pub async fn current_user(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

/// Routines created by `username`
///
/// The owner sees every routine they created; anyone else sees only the public
/// routines that have activities.
pub async fn user_routines(
    State(state): State<AppState>,
    Path(username): Path<String>,
    viewer: Option<AuthUser>,
) -> Result<Json<Vec<DecoratedRoutine>>> {
    if users::get_user_by_username(&state.db, &username)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!("User {}", username)));
    }

    let is_owner = matches!(&viewer, Some(AuthUser(user)) if user.username == username);
    let routines = if is_owner {
        routines::get_all_routines_by_user(&state.db, &username).await?
    } else {
        routines::get_public_routines_by_user(&state.db, &username).await?
    };

    Ok(Json(routines))
}
