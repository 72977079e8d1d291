use axum::{
    extract::{Path, State},
    Json,
};

use crate::constants::ERR_NAME_REQUIRED;
use crate::db::activities;
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityChanges, NewActivity};
use crate::routes::AuthUser;
use crate::AppState;

pub async fn list_activities(State(state): State<AppState>) -> Result<Json<Vec<Activity>>> {
    let activities = activities::get_all_activities(&state.db).await?;
    Ok(Json(activities))
}

/// Add an activity to the catalog; names are unique
pub async fn create_activity(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewActivity>,
) -> Result<Json<Activity>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput(ERR_NAME_REQUIRED.to_string()));
    }

    let activity = activities::create_activity(&state.db, name, &payload.description)
        .await
        .map_err(|e| AppError::on_unique_violation(e, AppError::ActivityAlreadyExists))?;

    tracing::info!("Activity {} created by user {}", activity.id, user.id);

    Ok(Json(activity))
}

pub async fn update_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
    AuthUser(_user): AuthUser,
    Json(changes): Json<ActivityChanges>,
) -> Result<Json<Activity>> {
    if matches!(&changes.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::InvalidInput(ERR_NAME_REQUIRED.to_string()));
    }

    let updated = if changes.is_empty() {
        activities::get_activity_by_id(&state.db, activity_id).await?
    } else {
        activities::update_activity(&state.db, activity_id, &changes)
            .await
            .map_err(|e| AppError::on_unique_violation(e, AppError::ActivityAlreadyExists))?
    };

    updated
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Activity {}", activity_id)))
}
