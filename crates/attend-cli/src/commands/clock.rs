//! Clock-in and clock-out commands.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::Args;

use attend_core::{AttendanceEngine, EmployeeId};

use crate::Config;
use crate::commands::util::{now_local, open_database, parse_time_of_day};

#[derive(Debug, Args)]
pub struct ClockArgs {
    /// Employee ID.
    #[arg(short, long)]
    pub employee: i64,

    /// Time of day (HH:MM or HH:MM:SS). Defaults to now.
    #[arg(long, value_parser = parse_time_of_day)]
    pub at: Option<NaiveTime>,

    /// Date the shift started (YYYY-MM-DD). Defaults to today. To close a
    /// shift that began the previous day, pass that day's date.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl ClockArgs {
    fn resolve(&self) -> Result<(EmployeeId, NaiveDate, NaiveTime)> {
        let employee = EmployeeId::new(self.employee)?;
        let now = now_local();
        Ok((
            employee,
            self.date.unwrap_or_else(|| now.date()),
            self.at.unwrap_or_else(|| now.time()),
        ))
    }
}

pub fn clock_in<W: Write>(writer: &mut W, args: &ClockArgs, config: &Config) -> Result<()> {
    let (employee, date, time) = args.resolve()?;
    let mut db = open_database(config)?;
    let mut engine = AttendanceEngine::new(&mut db, config.policy);

    let record = engine.clock_in_on(employee, date, time)?;
    writeln!(
        writer,
        "Clocked in employee {} at {} on {}",
        record.employee_id, record.clock_in, record.date
    )?;
    Ok(())
}

pub fn clock_out<W: Write>(writer: &mut W, args: &ClockArgs, config: &Config) -> Result<()> {
    let (employee, date, time) = args.resolve()?;
    let mut db = open_database(config)?;
    let mut engine = AttendanceEngine::new(&mut db, config.policy);

    let record = engine.clock_out_on(employee, date, time)?;
    writeln!(
        writer,
        "Clocked out employee {} at {} on {} (worked {}, overtime {})",
        record.employee_id, time, record.date, record.total_hours, record.ot_hours
    )?;
    Ok(())
}
