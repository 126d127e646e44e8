//! Delete command for removing attendance records.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use attend_core::AttendanceId;

use crate::Config;
use crate::commands::util::open_database;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Attendance record IDs to delete.
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<i64>,
}

pub fn run<W: Write>(writer: &mut W, args: &DeleteArgs, config: &Config) -> Result<()> {
    let ids = args
        .ids
        .iter()
        .map(|&id| AttendanceId::new(id))
        .collect::<Result<Vec<_>, _>>()?;

    let mut db = open_database(config)?;
    let deleted = db.delete_attendance(&ids)?;
    writeln!(writer, "Deleted {deleted} of {} attendance record(s)", ids.len())?;
    Ok(())
}
