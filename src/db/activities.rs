use sqlx::{QueryBuilder, Sqlite};

use super::{Db, DbResult};
use crate::models::{Activity, ActivityChanges};

pub async fn create_activity(db: &Db, name: &str, description: &str) -> DbResult<Activity> {
    sqlx::query_as::<_, Activity>(
        "INSERT INTO activities (name, description) VALUES (?, ?) RETURNING id, name, description",
    )
    .bind(name)
    .bind(description)
    .fetch_one(db)
    .await
}

pub async fn get_all_activities(db: &Db) -> DbResult<Vec<Activity>> {
    sqlx::query_as::<_, Activity>("SELECT id, name, description FROM activities ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn get_activity_by_id(db: &Db, id: i64) -> DbResult<Option<Activity>> {
    sqlx::query_as::<_, Activity>("SELECT id, name, description FROM activities WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Apply a partial update to an activity
///
/// An empty change set issues no statement and yields `None`.
pub async fn update_activity(
    db: &Db,
    id: i64,
    changes: &ActivityChanges,
) -> DbResult<Option<Activity>> {
    if changes.is_empty() {
        return Ok(None);
    }

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE activities SET ");
    let mut set = builder.separated(", ");
    if let Some(name) = &changes.name {
        set.push("name = ").push_bind_unseparated(name.clone());
    }
    if let Some(description) = &changes.description {
        set.push("description = ")
            .push_bind_unseparated(description.clone());
    }
    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING id, name, description");

    let activity = builder.build_query_as::<Activity>().fetch_optional(db).await?;
    Ok(activity)
}
