//! Routine activity links
//!
//! Pass-through CRUD: store errors are returned as-is and a missing id is `Ok(None)`.
//! Nothing here prevents two links for the same routine/activity pair.

use super::{Db, DbResult};
use crate::models::RoutineActivity;

pub async fn add_activity_to_routine(
    db: &Db,
    routine_id: i64,
    activity_id: i64,
    count: i64,
    duration: i64,
) -> DbResult<RoutineActivity> {
    let link = sqlx::query_as::<_, RoutineActivity>(
        r#"
        INSERT INTO routine_activities ("routineId", "activityId", count, duration)
        VALUES (?, ?, ?, ?)
        RETURNING id, "routineId", "activityId", count, duration
        "#,
    )
    .bind(routine_id)
    .bind(activity_id)
    .bind(count)
    .bind(duration)
    .fetch_one(db)
    .await?;

    tracing::debug!(
        "Linked activity {} to routine {} as {}",
        activity_id,
        routine_id,
        link.id
    );

    Ok(link)
}

/// Set count and duration on a link. The routine and activity ids are fixed.
pub async fn update_routine_activity(
    db: &Db,
    id: i64,
    count: i64,
    duration: i64,
) -> DbResult<Option<RoutineActivity>> {
    sqlx::query_as::<_, RoutineActivity>(
        r#"
        UPDATE routine_activities
        SET count = ?, duration = ?
        WHERE id = ?
        RETURNING id, "routineId", "activityId", count, duration
        "#,
    )
    .bind(count)
    .bind(duration)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn destroy_routine_activity(db: &Db, id: i64) -> DbResult<Option<RoutineActivity>> {
    sqlx::query_as::<_, RoutineActivity>(
        r#"
        DELETE FROM routine_activities
        WHERE id = ?
        RETURNING id, "routineId", "activityId", count, duration
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn get_routine_activities_by_routine(
    db: &Db,
    routine_id: i64,
) -> DbResult<Vec<RoutineActivity>> {
    sqlx::query_as::<_, RoutineActivity>(
        r#"
        SELECT id, "routineId", "activityId", count, duration
        FROM routine_activities
        WHERE "routineId" = ?
        ORDER BY id
        "#,
    )
    .bind(routine_id)
    .fetch_all(db)
    .await
}

pub async fn get_routine_activity_by_id(db: &Db, id: i64) -> DbResult<Option<RoutineActivity>> {
    sqlx::query_as::<_, RoutineActivity>(
        r#"
        SELECT id, "routineId", "activityId", count, duration
        FROM routine_activities
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}
