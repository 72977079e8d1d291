use serde::{Deserialize, Serialize};

use crate::constants::ERR_NEGATIVE_AMOUNT;

/// Link row from `routine_activities`: a routine performs an activity `count` times for `duration`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoutineActivity {
    pub id: i64,
    #[serde(rename = "routineId")]
    #[sqlx(rename = "routineId")]
    pub routine_id: i64,
    #[serde(rename = "activityId")]
    #[sqlx(rename = "activityId")]
    pub activity_id: i64,
    pub count: i64,
    pub duration: i64,
}

/// Body for attaching an activity to a routine (the routine id comes from the path)
#[derive(Debug, Clone, Deserialize)]
pub struct NewRoutineActivity {
    #[serde(rename = "activityId")]
    pub activity_id: i64,
    pub count: i64,
    pub duration: i64,
}

/// Partial update of a link's count and duration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutineActivityChanges {
    pub count: Option<i64>,
    pub duration: Option<i64>,
}

impl RoutineActivityChanges {
    /// Resolve against the current link, returning the `(count, duration)` to store
    pub fn merged_with(&self, current: &RoutineActivity) -> Result<(i64, i64), &'static str> {
        let count = self.count.unwrap_or(current.count);
        let duration = self.duration.unwrap_or(current.duration);
        validate_amounts(count, duration)?;
        Ok((count, duration))
    }
}

/// Count and duration are stored as given but never negative
pub fn validate_amounts(count: i64, duration: i64) -> Result<(), &'static str> {
    if count < 0 || duration < 0 {
        return Err(ERR_NEGATIVE_AMOUNT);
    }
    Ok(())
}
