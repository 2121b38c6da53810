//! Domain models for the queue service

pub mod request;
pub mod user;

pub use request::{NewQueueRequest, OpenRequestSummary, QueueRequest, RequestStatus};
pub use user::{NewUser, Role, User};
