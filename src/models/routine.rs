use serde::{Deserialize, Serialize};

use super::activity::DecoratedActivity;

/// Routine row from the `routines` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Routine {
    pub id: i64,
    #[serde(rename = "creatorId")]
    #[sqlx(rename = "creatorId")]
    pub creator_id: i64,
    #[serde(rename = "isPublic")]
    #[sqlx(rename = "isPublic")]
    pub is_public: bool,
    pub name: String,
    pub goal: String,
}

/// Fields required to create a routine. `is_public` has no default.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRoutine {
    #[serde(rename = "creatorId")]
    pub creator_id: i64,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    pub name: String,
    pub goal: String,
}

/// Routine with its creator's username and its linked activities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoratedRoutine {
    #[serde(flatten)]
    pub routine: Routine,
    #[serde(rename = "creatorName")]
    pub creator_name: String,
    pub activities: Vec<DecoratedActivity>,
}

/// Columns of `routines` that a partial update may assign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineColumn {
    IsPublic,
    Name,
    Goal,
}

impl RoutineColumn {
    /// Quoted column identifier as it appears in the schema
    pub fn as_sql(self) -> &'static str {
        match self {
            RoutineColumn::IsPublic => r#""isPublic""#,
            RoutineColumn::Name => "name",
            RoutineColumn::Goal => "goal",
        }
    }
}

/// Value bound for a single assignment in a routine update
#[derive(Debug, Clone, PartialEq)]
pub enum RoutineValue {
    Bool(bool),
    Text(String),
}

/// Partial update for a routine
///
/// Only the allow-listed fields can be set; unknown keys in a JSON body are dropped
/// during deserialization and never reach a statement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutineChanges {
    #[serde(rename = "isPublic")]
    pub is_public: Option<bool>,
    pub name: Option<String>,
    pub goal: Option<String>,
}

impl RoutineChanges {
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Column/value pairs for the fields that were supplied, in column order
    pub fn assignments(&self) -> Vec<(RoutineColumn, RoutineValue)> {
        let mut out = Vec::with_capacity(3);
        if let Some(is_public) = self.is_public {
            out.push((RoutineColumn::IsPublic, RoutineValue::Bool(is_public)));
        }
        if let Some(name) = &self.name {
            out.push((RoutineColumn::Name, RoutineValue::Text(name.clone())));
        }
        if let Some(goal) = &self.goal {
            out.push((RoutineColumn::Goal, RoutineValue::Text(goal.clone())));
        }
        out
    }
}
