//! Common library for the MyQueue application
//!
//! This crate provides shared infrastructure used by the MyQueue services,
//! including database connectivity, configuration, and error handling. It
//! carries no marketplace domain knowledge.

pub mod database;
pub mod error;
