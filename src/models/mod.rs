pub mod activity;
pub mod routine;
pub mod routine_activity;
pub mod user;

pub use activity::{Activity, ActivityChanges, DecoratedActivity, NewActivity};
pub use routine::{DecoratedRoutine, NewRoutine, Routine, RoutineChanges, RoutineColumn, RoutineValue};
pub use routine_activity::{NewRoutineActivity, RoutineActivity, RoutineActivityChanges};
pub use user::{Credentials, User};
