//! CLI subcommand implementations.

pub mod calc;
pub mod clock;
pub mod delete;
pub mod employee;
pub mod history;
pub mod util;
