//! MyQueue coordination service
//!
//! Matches requesters who post small tasks ("queue requests") with queuers
//! who fulfill them, tracking each task through the
//! open → accepted → completed lifecycle over a PostgreSQL store.

pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

/// Embedded SQL migrations for the queue service schema
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
