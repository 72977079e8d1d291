/// Users table: one row per account, `username` unique
pub const USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL
)"#;

/// Activities table: the exercise catalog
pub const ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    description TEXT NOT NULL
)"#;

/// Routines table: owned by a user through "creatorId"
pub const ROUTINES: &str = r#"
CREATE TABLE IF NOT EXISTS routines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    "creatorId" INTEGER NOT NULL REFERENCES users(id),
    "isPublic" BOOLEAN NOT NULL,
    name TEXT NOT NULL,
    goal TEXT NOT NULL
)"#;

/// Routine activities: links a routine to an activity with a count and duration
/// No uniqueness over ("routineId", "activityId")
pub const ROUTINE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS routine_activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    "routineId" INTEGER NOT NULL REFERENCES routines(id),
    "activityId" INTEGER NOT NULL REFERENCES activities(id),
    count INTEGER NOT NULL,
    duration INTEGER NOT NULL
)"#;

/// Lookups used by the routine read paths
pub const INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS routine_activities_routine_idx
    ON routine_activities ("routineId")"#;

/// Statements run in order on startup; dependents come after the tables they reference
pub const ALL: [&str; 5] = [USERS, ACTIVITIES, ROUTINES, ROUTINE_ACTIVITIES, INDEXES];
