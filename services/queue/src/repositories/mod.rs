//! Repositories for database operations

pub mod request;
pub mod user;

pub use request::RequestRepository;
pub use user::UserRepository;
