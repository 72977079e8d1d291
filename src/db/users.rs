use super::{Db, DbResult};
use crate::models::User;

/// Insert a user with an already-hashed password
///
/// A taken username surfaces as the store's unique-constraint error.
pub async fn create_user(db: &Db, username: &str, password_hash: &str) -> DbResult<User> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password) VALUES (?, ?) RETURNING id, username, password",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(db)
    .await
}

pub async fn get_user_by_id(db: &Db, id: i64) -> DbResult<Option<User>> {
    sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn get_user_by_username(db: &Db, username: &str) -> DbResult<Option<User>> {
    sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(db)
        .await
}
