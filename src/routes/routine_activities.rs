use axum::{
    extract::{Path, State},
    Json,
};

use crate::db::routine_activities;
use crate::error::{AppError, Result};
use crate::models::{RoutineActivity, RoutineActivityChanges, User};
use crate::routes::routines::owned_routine;
use crate::routes::AuthUser;
use crate::AppState;

/// Load a link and check that `user` owns the routine it belongs to
async fn owned_link(state: &AppState, link_id: i64, user: &User) -> Result<RoutineActivity> {
    let link = routine_activities::get_routine_activity_by_id(&state.db, link_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Routine activity {}", link_id)))?;

    owned_routine(state, link.routine_id, user).await?;

    Ok(link)
}

/// Change the count and/or duration of a link; missing fields keep their value
pub async fn update_routine_activity(
    State(state): State<AppState>,
    Path(link_id): Path<i64>,
    AuthUser(user): AuthUser,
    Json(changes): Json<RoutineActivityChanges>,
) -> Result<Json<RoutineActivity>> {
    let current = owned_link(&state, link_id, &user).await?;

    let (count, duration) = changes
        .merged_with(&current)
        .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;

    routine_activities::update_routine_activity(&state.db, link_id, count, duration)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Routine activity {}", link_id)))
}

pub async fn delete_routine_activity(
    State(state): State<AppState>,
    Path(link_id): Path<i64>,
    AuthUser(user): AuthUser,
) -> Result<Json<RoutineActivity>> {
    owned_link(&state, link_id, &user).await?;

    routine_activities::destroy_routine_activity(&state.db, link_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Routine activity {}", link_id)))
}
