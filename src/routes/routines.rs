use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::constants::ERR_NAME_REQUIRED;
use crate::db::{activities, routine_activities, routines};
use crate::error::{AppError, Result};
use crate::models::routine_activity::validate_amounts;
use crate::models::{
    DecoratedRoutine, NewRoutine, NewRoutineActivity, Routine, RoutineActivity, RoutineChanges,
    User,
};
use crate::routes::AuthUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRoutineRequest {
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    pub name: String,
    pub goal: String,
}

/// Load a routine and check that `user` created it
pub(crate) async fn owned_routine(state: &AppState, routine_id: i64, user: &User) -> Result<Routine> {
    let routine = routines::get_routine_by_id(&state.db, routine_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Routine {}", routine_id)))?;

    if routine.creator_id != user.id {
        tracing::warn!(
            "User {} attempted to modify routine {} owned by {}",
            user.id,
            routine.id,
            routine.creator_id
        );
        return Err(AppError::Forbidden(format!(
            "User {} is not allowed to modify routine {}",
            user.username, routine.id
        )));
    }

    Ok(routine)
}

/// Public routines that have at least one activity
pub async fn list_public_routines(
    State(state): State<AppState>,
) -> Result<Json<Vec<DecoratedRoutine>>> {
    let routines = routines::get_all_public_routines(&state.db).await?;
    Ok(Json(routines))
}

pub async fn create_routine(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateRoutineRequest>,
) -> Result<Json<Routine>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::InvalidInput(ERR_NAME_REQUIRED.to_string()));
    }

    let routine = routines::create_routine(
        &state.db,
        &NewRoutine {
            creator_id: user.id,
            is_public: payload.is_public,
            name: payload.name,
            goal: payload.goal,
        },
    )
    .await?;

    Ok(Json(routine))
}

/// Partially update a routine the caller owns
///
/// An empty body changes nothing and returns the routine as it is.
pub async fn update_routine(
    State(state): State<AppState>,
    Path(routine_id): Path<i64>,
    AuthUser(user): AuthUser,
    Json(changes): Json<RoutineChanges>,
) -> Result<Json<Routine>> {
    let current = owned_routine(&state, routine_id, &user).await?;

    if matches!(&changes.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::InvalidInput(ERR_NAME_REQUIRED.to_string()));
    }

    if changes.is_empty() {
        return Ok(Json(current));
    }

    routines::update_routine(&state.db, routine_id, &changes)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Routine {}", routine_id)))
}

/// Delete a routine the caller owns, along with its activity links
pub async fn delete_routine(
    State(state): State<AppState>,
    Path(routine_id): Path<i64>,
    AuthUser(user): AuthUser,
) -> Result<Json<Routine>> {
    owned_routine(&state, routine_id, &user).await?;

    routines::destroy_routine(&state.db, routine_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Routine {}", routine_id)))
}

/// Attach an activity to a routine the caller owns
pub async fn add_activity_to_routine(
    State(state): State<AppState>,
    Path(routine_id): Path<i64>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewRoutineActivity>,
) -> Result<Json<RoutineActivity>> {
    owned_routine(&state, routine_id, &user).await?;

    validate_amounts(payload.count, payload.duration)
        .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;

    if activities::get_activity_by_id(&state.db, payload.activity_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!("Activity {}", payload.activity_id)));
    }

    let link = routine_activities::add_activity_to_routine(
        &state.db,
        routine_id,
        payload.activity_id,
        payload.count,
        payload.duration,
    )
    .await?;

    Ok(Json(link))
}
