pub mod board;
pub mod config;
pub mod deletion;
pub mod error;
pub mod form;
pub mod inflight;
pub mod media;
pub mod model;
pub mod notify;
pub mod refresh;
pub mod remote;
pub mod submission;
pub mod task_api;

pub use error::AppError;
pub use task_api::TaskDesk;
