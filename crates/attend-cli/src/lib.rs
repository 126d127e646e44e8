//! Attendance clock CLI library.
//!
//! This crate binds the attendance engine to the command line.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
