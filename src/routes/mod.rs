pub mod activities;
pub mod auth;
pub mod health;
pub mod routine_activities;
pub mod routines;
pub mod users;

pub use activities::{create_activity, list_activities, update_activity};
pub use auth::AuthUser;
pub use health::health_check;
pub use routine_activities::{delete_routine_activity, update_routine_activity};
pub use routines::{
    add_activity_to_routine, create_routine, delete_routine, list_public_routines, update_routine,
};
pub use users::{current_user, login_user, register_user, user_routines};
