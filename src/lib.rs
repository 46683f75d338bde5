//! Annual governance retro-planning for French SAS companies
//!
//! The [`schedule`] module holds the pure obligation scheduler; the other
//! modules wrap it with request validation, task persistence, reminders and
//! reporting for the `retroplan` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod reminders;
pub mod request;
pub mod runner;
pub mod schedule;
pub mod store;
