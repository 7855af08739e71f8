mod task;
mod user;

pub use task::{Task, TaskPayload, UserRef};
pub use user::User;
