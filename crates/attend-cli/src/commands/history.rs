//! History command for listing an employee's attendance records.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{Days, NaiveDate};
use clap::Args;
use serde::Serialize;

use attend_core::{AttendanceRecord, EmployeeId, WorkedDuration};

use crate::Config;
use crate::commands::util::{now_local, open_database};

/// Days shown when no `--from` is given.
const DEFAULT_WINDOW_DAYS: u64 = 6;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Employee ID.
    #[arg(short, long)]
    pub employee: i64,

    /// First date to include (YYYY-MM-DD). Defaults to a week before `--to`.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct HistoryReport<'a> {
    employee_id: EmployeeId,
    name: &'a str,
    from: NaiveDate,
    to: NaiveDate,
    records: &'a [AttendanceRecord],
    total_hours: WorkedDuration,
    ot_hours: WorkedDuration,
}

pub fn run<W: Write>(writer: &mut W, args: &HistoryArgs, config: &Config) -> Result<()> {
    let employee_id = EmployeeId::new(args.employee)?;
    let to = args.to.unwrap_or_else(|| now_local().date());
    let from = args
        .from
        .unwrap_or_else(|| to - Days::new(DEFAULT_WINDOW_DAYS));
    if to < from {
        bail!("--from {from} is after --to {to}");
    }

    let db = open_database(config)?;
    let Some(employee) = db.get_employee(employee_id)? else {
        bail!("employee not found with id: {employee_id}");
    };
    let records = db.list_attendance_for_employee(employee_id, from, to)?;
    tracing::debug!(%employee_id, %from, %to, count = records.len(), "loaded history");

    let report = HistoryReport {
        employee_id,
        name: &employee.name,
        from,
        to,
        records: &records,
        total_hours: records.iter().map(|r| r.total_hours).sum(),
        ot_hours: records.iter().map(|r| r.ot_hours).sum(),
    };

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }
    write_table(writer, &report)
}

fn write_table<W: Write>(writer: &mut W, report: &HistoryReport<'_>) -> Result<()> {
    writeln!(
        writer,
        "Attendance for {} (employee {}), {} to {}",
        report.name, report.employee_id, report.from, report.to
    )?;

    if report.records.is_empty() {
        writeln!(writer, "No records.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<6} {:<10}  {:<8}  {:<8}  {:>8}  {:>8}",
        "ID", "DATE", "IN", "OUT", "TOTAL", "OT"
    )?;
    for record in report.records {
        let id = record.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        let clock_out = record
            .clock_out
            .map_or_else(|| "open".to_string(), |t| t.to_string());
        writeln!(
            writer,
            "{:<6} {:<10}  {:<8}  {:<8}  {:>8}  {:>8}",
            id,
            record.date.to_string(),
            record.clock_in.to_string(),
            clock_out,
            record.total_hours.to_string(),
            record.ot_hours.to_string(),
        )?;
    }
    writeln!(
        writer,
        "Total: {} worked, {} overtime",
        report.total_hours, report.ot_hours
    )?;
    Ok(())
}
