//! Routine repository
//!
//! Plain reads return bare `routines` rows. The "many routines" reads join the creator's
//! username and attach each routine's activities. Which routines qualify differs per
//! read path:
//!
//! | read                               | visibility   | needs a linked activity |
//! |------------------------------------|--------------|-------------------------|
//! | [`get_all_routines`]               | any          | yes                     |
//! | [`get_all_public_routines`]        | public       | yes                     |
//! | [`get_all_routines_by_user`]       | any          | no                      |
//! | [`get_public_routines_by_user`]    | public       | yes                     |
//! | [`get_public_routines_by_activity`]| public       | yes                     |
//!
//! Each routine appears at most once regardless of how many links it has.

use futures::{stream, StreamExt, TryStreamExt};
use sqlx::{QueryBuilder, Sqlite};

use super::{Db, DbResult};
use crate::constants::DECORATE_CONCURRENCY;
use crate::models::{
    DecoratedActivity, DecoratedRoutine, NewRoutine, Routine, RoutineChanges, RoutineValue,
};

/// Routine columns plus the creator's username, shared by the decorated reads
const ROUTINE_WITH_CREATOR: &str = r#"
    SELECT routines.id, routines."creatorId", routines."isPublic", routines.name, routines.goal,
           users.username AS "creatorName"
    FROM routines
    JOIN users ON users.id = routines."creatorId"
"#;

/// Filter keeping only routines that have at least one activity link
const HAS_ACTIVITY: &str = r#"
    EXISTS (SELECT 1 FROM routine_activities ra WHERE ra."routineId" = routines.id)
"#;

/// Row shape of [`ROUTINE_WITH_CREATOR`]
#[derive(Debug, sqlx::FromRow)]
struct RoutineWithCreator {
    #[sqlx(flatten)]
    routine: Routine,
    #[sqlx(rename = "creatorName")]
    creator_name: String,
}

pub async fn create_routine(db: &Db, new: &NewRoutine) -> DbResult<Routine> {
    let routine = sqlx::query_as::<_, Routine>(
        r#"
        INSERT INTO routines ("creatorId", "isPublic", name, goal)
        VALUES (?, ?, ?, ?)
        RETURNING id, "creatorId", "isPublic", name, goal
        "#,
    )
    .bind(new.creator_id)
    .bind(new.is_public)
    .bind(&new.name)
    .bind(&new.goal)
    .fetch_one(db)
    .await?;

    tracing::info!(
        "Routine {} created by user {}",
        routine.id,
        routine.creator_id
    );

    Ok(routine)
}

/// Every routine row, without creator name or activities
pub async fn get_routines_without_activities(db: &Db) -> DbResult<Vec<Routine>> {
    sqlx::query_as::<_, Routine>(
        r#"SELECT id, "creatorId", "isPublic", name, goal FROM routines ORDER BY id"#,
    )
    .fetch_all(db)
    .await
}

pub async fn get_routine_by_id(db: &Db, id: i64) -> DbResult<Option<Routine>> {
    sqlx::query_as::<_, Routine>(
        r#"SELECT id, "creatorId", "isPublic", name, goal FROM routines WHERE id = ?"#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Apply a partial update to a routine
///
/// Only the columns present in `changes` are assigned. With nothing to assign no
/// statement is issued and `None` is returned; otherwise `None` means no routine
/// has that id.
pub async fn update_routine(
    db: &Db,
    id: i64,
    changes: &RoutineChanges,
) -> DbResult<Option<Routine>> {
    let assignments = changes.assignments();
    if assignments.is_empty() {
        tracing::debug!("Empty update for routine {}, skipping", id);
        return Ok(None);
    }

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE routines SET ");
    let mut set = builder.separated(", ");
    for (column, value) in assignments {
        set.push(format_args!("{} = ", column.as_sql()));
        match value {
            RoutineValue::Bool(flag) => set.push_bind_unseparated(flag),
            RoutineValue::Text(text) => set.push_bind_unseparated(text),
        };
    }
    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(r#" RETURNING id, "creatorId", "isPublic", name, goal"#);

    let routine = builder.build_query_as::<Routine>().fetch_optional(db).await?;
    Ok(routine)
}

/// Delete a routine together with its activity links
///
/// Both deletes run in one transaction, links first. If either statement fails the
/// transaction is dropped uncommitted and rolls back.
pub async fn destroy_routine(db: &Db, id: i64) -> DbResult<Option<Routine>> {
    let mut tx = db.begin().await?;

    let unlinked = sqlx::query(r#"DELETE FROM routine_activities WHERE "routineId" = ?"#)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let routine = sqlx::query_as::<_, Routine>(
        r#"DELETE FROM routines WHERE id = ? RETURNING id, "creatorId", "isPublic", name, goal"#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    if routine.is_some() {
        tracing::info!("Routine {} deleted with {} activity links", id, unlinked);
    }

    Ok(routine)
}

/// Activities linked to a routine, annotated with each link's count and duration
pub async fn get_activities_by_routine_id(db: &Db, id: i64) -> DbResult<Vec<DecoratedActivity>> {
    sqlx::query_as::<_, DecoratedActivity>(
        r#"
        SELECT a.id, a.name, a.description,
               ra.id AS "routineActivityId", ra."routineId", ra."activityId",
               ra.count, ra.duration
        FROM activities a
        JOIN routine_activities ra ON ra."activityId" = a.id
        WHERE ra."routineId" = ?
        ORDER BY ra.id
        "#,
    )
    .bind(id)
    .fetch_all(db)
    .await
}

/// Every routine with at least one activity, public or not
pub async fn get_all_routines(db: &Db) -> DbResult<Vec<DecoratedRoutine>> {
    let sql = format!("{ROUTINE_WITH_CREATOR} WHERE {HAS_ACTIVITY} ORDER BY routines.id");
    let rows = sqlx::query_as::<_, RoutineWithCreator>(&sql)
        .fetch_all(db)
        .await?;
    attach_activities(db, rows).await
}

/// Public routines with at least one activity, each listed once
pub async fn get_all_public_routines(db: &Db) -> DbResult<Vec<DecoratedRoutine>> {
    let sql = format!(
        r#"{ROUTINE_WITH_CREATOR} WHERE routines."isPublic" = TRUE AND {HAS_ACTIVITY} ORDER BY routines.id"#
    );
    let rows = sqlx::query_as::<_, RoutineWithCreator>(&sql)
        .fetch_all(db)
        .await?;
    attach_activities(db, rows).await
}

/// All of a user's routines, private ones and ones without activities included
pub async fn get_all_routines_by_user(db: &Db, username: &str) -> DbResult<Vec<DecoratedRoutine>> {
    let sql = format!("{ROUTINE_WITH_CREATOR} WHERE users.username = ? ORDER BY routines.id");
    let rows = sqlx::query_as::<_, RoutineWithCreator>(&sql)
        .bind(username)
        .fetch_all(db)
        .await?;
    attach_activities(db, rows).await
}

/// A user's public routines that have at least one activity
pub async fn get_public_routines_by_user(
    db: &Db,
    username: &str,
) -> DbResult<Vec<DecoratedRoutine>> {
    let sql = format!(
        r#"{ROUTINE_WITH_CREATOR}
        WHERE users.username = ? AND routines."isPublic" = TRUE AND {HAS_ACTIVITY}
        ORDER BY routines.id"#
    );
    let rows = sqlx::query_as::<_, RoutineWithCreator>(&sql)
        .bind(username)
        .fetch_all(db)
        .await?;
    attach_activities(db, rows).await
}

/// Public routines that have at least one activity
///
/// Takes no activity to filter by; the result matches [`get_all_public_routines`].
pub async fn get_public_routines_by_activity(db: &Db) -> DbResult<Vec<DecoratedRoutine>> {
    let sql = format!(
        r#"{ROUTINE_WITH_CREATOR} WHERE routines."isPublic" = TRUE AND {HAS_ACTIVITY} ORDER BY routines.id"#
    );
    let rows = sqlx::query_as::<_, RoutineWithCreator>(&sql)
        .fetch_all(db)
        .await?;
    attach_activities(db, rows).await
}

/// Fetch activities for each routine, at most [`DECORATE_CONCURRENCY`] at a time,
/// keeping the routines in their original order
async fn attach_activities(
    db: &Db,
    rows: Vec<RoutineWithCreator>,
) -> DbResult<Vec<DecoratedRoutine>> {
    stream::iter(rows)
        .map(|row| async move {
            let activities = get_activities_by_routine_id(db, row.routine.id).await?;
            Ok::<_, sqlx::Error>(DecoratedRoutine {
                routine: row.routine,
                creator_name: row.creator_name,
                activities,
            })
        })
        .buffered(DECORATE_CONCURRENCY)
        .try_collect()
        .await
}
