use serde::{Deserialize, Serialize};

/// Catalog activity from the `activities` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Payload for creating an activity
#[derive(Debug, Clone, Deserialize)]
pub struct NewActivity {
    pub name: String,
    pub description: String,
}

/// Partial update for an activity; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ActivityChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Activity as it appears inside a routine, annotated with the link's count and duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DecoratedActivity {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "routineActivityId")]
    #[sqlx(rename = "routineActivityId")]
    pub routine_activity_id: i64,
    #[serde(rename = "routineId")]
    #[sqlx(rename = "routineId")]
    pub routine_id: i64,
    #[serde(rename = "activityId")]
    #[sqlx(rename = "activityId")]
    pub activity_id: i64,
    pub count: i64,
    pub duration: i64,
}
