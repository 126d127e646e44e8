//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::calc::CalcAction;
use crate::commands::clock::ClockArgs;
use crate::commands::delete::DeleteArgs;
use crate::commands::employee::EmployeeAction;
use crate::commands::history::HistoryArgs;

/// Attendance clock.
///
/// Records clock-in and clock-out times and computes worked time and overtime,
/// including shifts that cross midnight.
#[derive(Debug, Parser)]
#[command(name = "attend", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage employees.
    #[command(subcommand)]
    Employee(EmployeeAction),

    /// Clock an employee in.
    ClockIn(ClockArgs),

    /// Clock an employee out and compute the day's totals.
    ClockOut(ClockArgs),

    /// Show an employee's attendance records.
    History(HistoryArgs),

    /// Delete attendance records by ID.
    Delete(DeleteArgs),

    /// Compute durations without touching the database.
    #[command(subcommand)]
    Calc(CalcAction),
}
