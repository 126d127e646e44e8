//! Storage layer for attendance records.
//!
//! Provides persistence for employees and attendance records using `rusqlite`,
//! and implements [`AttendanceStore`] for the engine.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! Separate processes or threads should each open their own `Database`; SQLite
//! serializes writers and the schema below keeps the open-record rule intact.
//!
//! # Schema
//!
//! Dates are stored as TEXT `YYYY-MM-DD`, times of day as TEXT `HH:MM:SS` and
//! durations as TEXT `H:MM:SS`.
//!
//! ## Open-record uniqueness
//!
//! `idx_attendance_one_open` is a partial unique index on `employee_id` over
//! rows with a NULL `clock_out`. A second open row for the same employee fails
//! on insert regardless of how many writers race. Closing a record uses
//! `UPDATE ... WHERE clock_out IS NULL`, so only one writer can close it.
//!
//! ## Timeouts
//!
//! Writers wait at most the configured busy timeout for a lock and then fail
//! with [`StoreError::Unavailable`]. Only transient SQLite failures such as a
//! busy or locked database are reported that way. Rows that fail to decode and
//! other SQLite errors are [`StoreError::Backend`].

use std::path::Path;
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, SecondsFormat, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params, params_from_iter};
use thiserror::Error;

use attend_core::{
    AttendanceId, AttendanceRecord, AttendanceStore, Employee, EmployeeId, StoreError,
    ValidationError, WorkedDuration,
};

/// How long a writer waits for a lock before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A value failed domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A stored attendance row could not be decoded.
    #[error("invalid attendance row {id}: {message}")]
    InvalidRow { id: i64, message: String },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Raw attendance row as stored.
#[derive(Debug)]
struct AttendanceRow {
    id: i64,
    employee_id: i64,
    date: String,
    clock_in: String,
    clock_out: Option<String>,
    total_hours: String,
    ot_hours: String,
}

impl AttendanceRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            date: row.get(2)?,
            clock_in: row.get(3)?,
            clock_out: row.get(4)?,
            total_hours: row.get(5)?,
            ot_hours: row.get(6)?,
        })
    }

    fn into_record(self) -> Result<AttendanceRecord, DbError> {
        let id = self.id;
        let invalid = |message: String| DbError::InvalidRow { id, message };

        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| invalid(format!("date '{}': {e}", self.date)))?;
        let clock_in = parse_time(&self.clock_in).map_err(|e| invalid(format!("clock_in: {e}")))?;
        let clock_out = self
            .clock_out
            .as_deref()
            .map(parse_time)
            .transpose()
            .map_err(|e| invalid(format!("clock_out: {e}")))?;
        let total_hours: WorkedDuration = self
            .total_hours
            .parse()
            .map_err(|e| invalid(format!("total_hours: {e}")))?;
        let ot_hours: WorkedDuration = self
            .ot_hours
            .parse()
            .map_err(|e| invalid(format!("ot_hours: {e}")))?;

        Ok(AttendanceRecord {
            id: Some(AttendanceId::new(self.id)?),
            employee_id: EmployeeId::new(self.employee_id)?,
            date,
            clock_in,
            clock_out,
            total_hours,
            ot_hours,
        })
    }
}

const ATTENDANCE_COLUMNS: &str =
    "id, employee_id, date, clock_in, clock_out, total_hours, ot_hours";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Sets how long a writer waits on a locked database before failing.
    pub fn set_busy_timeout(&self, timeout: Duration) -> Result<(), DbError> {
        self.conn.busy_timeout(timeout)?;
        Ok(())
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            -- date: 'YYYY-MM-DD'; clock_in/clock_out: 'HH:MM:SS'
            -- total_hours/ot_hours: 'H:MM:SS', written once on clock-out
            CREATE TABLE IF NOT EXISTS attendance (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                clock_in TEXT NOT NULL,
                clock_out TEXT,
                total_hours TEXT NOT NULL DEFAULT '0:00:00',
                ot_hours TEXT NOT NULL DEFAULT '0:00:00',
                FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_attendance_employee_date ON attendance(employee_id, date);
            CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);
            CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_one_open
                ON attendance(employee_id) WHERE clock_out IS NULL;
            ",
        )?;
        Ok(())
    }

    /// Adds an employee and returns it with its assigned ID.
    pub fn insert_employee(&mut self, name: &str) -> Result<Employee, DbError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "employee name",
            }
            .into());
        }
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.conn.execute(
            "INSERT INTO employees (name, created_at) VALUES (?, ?)",
            params![name, created_at],
        )?;
        let id = EmployeeId::new(self.conn.last_insert_rowid())?;
        tracing::debug!(employee_id = %id, name, "employee inserted");
        Ok(Employee::new(id, name)?)
    }

    /// Lists employees ordered by ID.
    pub fn list_employees(&self) -> Result<Vec<Employee>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM employees ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let name: String = row.get(1)?;
            Ok((id, name))
        })?;
        let mut employees = Vec::new();
        for row in rows {
            let (id, name) = row?;
            employees.push(Employee::new(EmployeeId::new(id)?, name)?);
        }
        Ok(employees)
    }

    /// Looks up a single employee.
    pub fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, DbError> {
        let name: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM employees WHERE id = ?",
                [id.get()],
                |row| row.get(0),
            )
            .optional()?;
        name.map(|name| Employee::new(id, name))
            .transpose()
            .map_err(DbError::from)
    }

    /// Looks up a single attendance record.
    pub fn find_attendance(&self, id: AttendanceId) -> Result<Option<AttendanceRecord>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE id = ?"),
                [id.get()],
                AttendanceRow::from_row,
            )
            .optional()?;
        row.map(AttendanceRow::into_record).transpose()
    }

    /// Lists attendance for an employee on one date, ordered by clock-in.
    pub fn list_attendance_on(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, DbError> {
        self.list_attendance_for_employee(employee_id, date, date)
    }

    /// Lists attendance for an employee between two dates.
    ///
    /// The range is inclusive of both `from` and `to`.
    pub fn list_attendance_for_employee(
        &self,
        employee_id: EmployeeId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, DbError> {
        if to < from {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {ATTENDANCE_COLUMNS}
            FROM attendance
            WHERE employee_id = ? AND date >= ? AND date <= ?
            ORDER BY date ASC, clock_in ASC, id ASC
            "
        ))?;
        let rows = stmt.query_map(
            params![employee_id.get(), format_date(from), format_date(to)],
            AttendanceRow::from_row,
        )?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?.into_record()?);
        }
        Ok(records)
    }

    /// Deletes attendance records by ID, returning how many were removed.
    pub fn delete_attendance(&mut self, ids: &[AttendanceId]) -> Result<usize, DbError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let tx = self.conn.transaction()?;
        let deleted = tx.execute(
            &format!("DELETE FROM attendance WHERE id IN ({placeholders})"),
            params_from_iter(ids.iter().map(|id| id.get())),
        )?;
        tx.commit()?;
        tracing::debug!(requested = ids.len(), deleted, "attendance deleted");
        Ok(deleted)
    }

    fn insert_attendance(&self, record: &AttendanceRecord) -> Result<AttendanceId, StoreError> {
        let result = self.conn.execute(
            "
            INSERT INTO attendance (employee_id, date, clock_in, clock_out, total_hours, ot_hours)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
            params![
                record.employee_id.get(),
                format_date(record.date),
                format_time(record.clock_in),
                record.clock_out.map(format_time),
                record.total_hours.to_string(),
                record.ot_hours.to_string(),
            ],
        );
        match result {
            Ok(_) => {}
            Err(err) if is_constraint(&err, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) => {
                tracing::debug!(employee_id = %record.employee_id, "open record already exists");
                return Err(StoreError::OpenRecordExists(record.employee_id));
            }
            Err(err) if is_constraint(&err, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
                tracing::debug!(employee_id = %record.employee_id, "employee removed before insert");
                return Err(StoreError::EmployeeMissing(record.employee_id));
            }
            Err(err) => return Err(store_error(err)),
        }
        AttendanceId::new(self.conn.last_insert_rowid()).map_err(store_error)
    }

    fn close_attendance(
        &self,
        id: AttendanceId,
        record: &AttendanceRecord,
    ) -> Result<(), StoreError> {
        let updated = self
            .conn
            .execute(
                "
                UPDATE attendance
                SET clock_out = ?, total_hours = ?, ot_hours = ?
                WHERE id = ? AND clock_out IS NULL
                ",
                params![
                    record.clock_out.map(format_time),
                    record.total_hours.to_string(),
                    record.ot_hours.to_string(),
                    id.get(),
                ],
            )
            .map_err(store_error)?;
        if updated == 0 {
            tracing::debug!(attendance_id = %id, "record already closed");
            return Err(StoreError::RecordNotOpen(id));
        }
        Ok(())
    }
}

impl AttendanceStore for Database {
    fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        self.get_employee(id).map_err(store_error)
    }

    fn find_attendance_by_employee_and_date(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.list_attendance_on(employee_id, date)
            .map_err(store_error)
    }

    fn save(&mut self, mut record: AttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        match record.id {
            None => {
                let id = self.insert_attendance(&record)?;
                record.id = Some(id);
            }
            Some(id) => self.close_attendance(id, &record)?,
        }
        tracing::debug!(attendance_id = ?record.id, employee_id = %record.employee_id, "attendance saved");
        Ok(record)
    }
}

fn is_constraint(err: &rusqlite::Error, extended_code: std::ffi::c_int) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation && e.extended_code == extended_code
    )
}

/// Returns true for failures that may clear up if the caller tries again.
fn is_transient(err: &DbError) -> bool {
    matches!(
        err,
        DbError::Sqlite(rusqlite::Error::SqliteFailure(e, _))
            if matches!(
                e.code,
                ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::SystemIoFailure
                    | ErrorCode::CannotOpen
                    | ErrorCode::DiskFull
            )
    )
}

fn store_error(err: impl Into<DbError>) -> StoreError {
    let err = err.into();
    if is_transient(&err) {
        StoreError::Unavailable(Box::new(err))
    } else {
        tracing::warn!(error = %err, "attendance storage failed");
        StoreError::Backend(Box::new(err))
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use attend_core::{AttendanceEngine, AttendanceError, AttendancePolicy, Conflict};

    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn db_with_employee() -> (Database, EmployeeId) {
        let mut db = Database::open_in_memory().expect("open in-memory db");
        let employee = db.insert_employee("Ada Lovelace").expect("insert employee");
        (db, employee.id)
    }

    fn index_names(conn: &Connection, table: &str) -> HashSet<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA index_list({table})"))
            .expect("prepare index_list");
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .expect("query index_list");
        rows.map(|row| row.expect("index_list row")).collect()
    }

    #[test]
    fn open_in_memory_database() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn schema_has_open_record_index() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let indexes = index_names(&db.conn, "attendance");
        for name in [
            "idx_attendance_employee_date",
            "idx_attendance_date",
            "idx_attendance_one_open",
        ] {
            assert!(indexes.contains(name), "missing index {name}");
        }
    }

    #[test]
    fn init_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("attend.db");
        let mut db = Database::open(&path).unwrap();
        db.insert_employee("Grace").unwrap();
        drop(db);

        let db = Database::open(&path).unwrap();
        assert_eq!(db.list_employees().unwrap().len(), 1);
    }

    #[test]
    fn insert_employee_assigns_ids_and_trims_name() {
        let mut db = Database::open_in_memory().unwrap();
        let a = db.insert_employee("  Ada ").unwrap();
        let b = db.insert_employee("Grace").unwrap();
        assert_eq!(a.name, "Ada");
        assert!(b.id > a.id);
        assert_eq!(db.list_employees().unwrap(), vec![a.clone(), b]);
        assert_eq!(db.get_employee(a.id).unwrap(), Some(a));
        assert_eq!(db.get_employee(EmployeeId::new(99).unwrap()).unwrap(), None);
    }

    #[test]
    fn insert_employee_rejects_blank_name() {
        let mut db = Database::open_in_memory().unwrap();
        let err = db.insert_employee("   ").unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[test]
    fn save_assigns_id_and_roundtrips() {
        let (mut db, emp) = db_with_employee();
        let saved = db
            .save(AttendanceRecord::open(emp, d(15), t(9, 0, 0)))
            .unwrap();
        let id = saved.id.expect("id assigned");

        let loaded = db.find_attendance(id).unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert!(loaded.is_open());
        assert_eq!(loaded.total_hours, WorkedDuration::ZERO);
    }

    #[test]
    fn second_open_record_violates_unique_index() {
        let (mut db, emp) = db_with_employee();
        db.save(AttendanceRecord::open(emp, d(15), t(9, 0, 0)))
            .unwrap();

        let err = db
            .save(AttendanceRecord::open(emp, d(16), t(9, 0, 0)))
            .unwrap_err();
        assert!(matches!(err, StoreError::OpenRecordExists(id) if id == emp));
    }

    #[test]
    fn open_records_for_different_employees_coexist() {
        let (mut db, a) = db_with_employee();
        let b = db.insert_employee("Grace").unwrap().id;
        db.save(AttendanceRecord::open(a, d(15), t(9, 0, 0)))
            .unwrap();
        db.save(AttendanceRecord::open(b, d(15), t(9, 0, 0)))
            .unwrap();
    }

    #[test]
    fn closing_twice_reports_record_not_open() {
        let (mut db, emp) = db_with_employee();
        let mut record = db
            .save(AttendanceRecord::open(emp, d(15), t(9, 0, 0)))
            .unwrap();
        record.clock_out = Some(t(17, 0, 0));
        record.total_hours = "8:00:00".parse().unwrap();
        db.save(record.clone()).unwrap();

        record.clock_out = Some(t(18, 0, 0));
        let err = db.save(record.clone()).unwrap_err();
        assert!(matches!(err, StoreError::RecordNotOpen(id) if Some(id) == record.id));

        let stored = db.find_attendance(record.id.unwrap()).unwrap().unwrap();
        assert_eq!(stored.clock_out, Some(t(17, 0, 0)));
    }

    #[test]
    fn engine_clock_cycle_persists_totals() {
        let (mut db, emp) = db_with_employee();
        {
            let mut engine = AttendanceEngine::new(&mut db, AttendancePolicy::default());
            engine.clock_in_on(emp, d(15), t(8, 0, 0)).unwrap();
            engine.clock_out_on(emp, d(15), t(19, 30, 0)).unwrap();
        }

        let records = db.list_attendance_on(emp, d(15)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].clock_out, Some(t(19, 30, 0)));
        assert_eq!(records[0].total_hours.to_string(), "11:30:00");
        assert_eq!(records[0].ot_hours.to_string(), "2:30:00");
    }

    #[test]
    fn engine_reports_conflicts_from_database() {
        let (mut db, emp) = db_with_employee();
        let mut engine = AttendanceEngine::new(&mut db, AttendancePolicy::default());
        engine.clock_in_on(emp, d(15), t(9, 0, 0)).unwrap();

        let err = engine.clock_in_on(emp, d(15), t(10, 0, 0)).unwrap_err();
        assert!(matches!(
            err,
            AttendanceError::ConflictState(Conflict::AlreadyClockedIn)
        ));

        let err = engine.clock_out_on(emp, d(16), t(17, 0, 0)).unwrap_err();
        assert!(matches!(
            err,
            AttendanceError::ConflictState(Conflict::NoClockIn)
        ));
    }

    #[test]
    fn list_attendance_for_employee_is_inclusive_and_ordered() {
        let (mut db, emp) = db_with_employee();
        let other = db.insert_employee("Grace").unwrap().id;
        let mut engine = AttendanceEngine::new(&mut db, AttendancePolicy::default());
        for day in [14, 12, 13, 10] {
            engine.clock_in_on(emp, d(day), t(9, 0, 0)).unwrap();
            engine.clock_out_on(emp, d(day), t(17, 0, 0)).unwrap();
        }
        engine.clock_in_on(other, d(13), t(9, 0, 0)).unwrap();

        let records = db.list_attendance_for_employee(emp, d(12), d(14)).unwrap();
        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(12), d(13), d(14)]);
        assert!(records.iter().all(|r| r.employee_id == emp));

        assert!(db
            .list_attendance_for_employee(emp, d(14), d(12))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn delete_attendance_removes_requested_rows() {
        let (mut db, emp) = db_with_employee();
        let mut ids = Vec::new();
        {
            let mut engine = AttendanceEngine::new(&mut db, AttendancePolicy::default());
            for day in [10, 11, 12] {
                let record = engine.clock_in_on(emp, d(day), t(9, 0, 0)).unwrap();
                engine.clock_out_on(emp, d(day), t(17, 0, 0)).unwrap();
                ids.push(record.id.unwrap());
            }
        }

        let missing = AttendanceId::new(999).unwrap();
        let deleted = db.delete_attendance(&[ids[0], ids[2], missing]).unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(db.delete_attendance(&[]).unwrap(), 0);

        let remaining = db.list_attendance_for_employee(emp, d(1), d(31)).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, Some(ids[1]));
    }

    #[test]
    fn corrupt_row_is_reported() {
        let (db, emp) = db_with_employee();
        db.conn
            .execute(
                "INSERT INTO attendance (employee_id, date, clock_in) VALUES (?, '2026-01-15', 'nine')",
                [emp.get()],
            )
            .unwrap();

        let err = db.list_attendance_on(emp, d(15)).unwrap_err();
        assert!(matches!(err, DbError::InvalidRow { .. }));
    }

    #[test]
    fn corrupt_row_is_a_permanent_store_failure() {
        let (mut db, emp) = db_with_employee();
        db.conn
            .execute(
                "INSERT INTO attendance (employee_id, date, clock_in, clock_out) VALUES (?, '2026-01-15', '09:00:00', 'x')",
                [emp.get()],
            )
            .unwrap();

        let err = db.find_attendance_by_employee_and_date(emp, d(15)).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));

        let mut engine = AttendanceEngine::new(&mut db, AttendancePolicy::default());
        let err = engine.clock_in_on(emp, d(15), t(10, 0, 0)).unwrap_err();
        assert!(matches!(err, AttendanceError::Storage(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn insert_for_missing_employee_reports_employee_missing() {
        let (mut db, _) = db_with_employee();
        let ghost = EmployeeId::new(99).unwrap();

        let err = db
            .save(AttendanceRecord::open(ghost, d(15), t(9, 0, 0)))
            .unwrap_err();
        assert!(matches!(err, StoreError::EmployeeMissing(id) if id == ghost));
        assert!(matches!(
            AttendanceError::from(err),
            AttendanceError::NotFound { employee_id } if employee_id == ghost
        ));
    }

    #[test]
    fn locked_database_fails_fast_as_unavailable() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("attend.db");
        let mut db = Database::open(&path).unwrap();
        let emp = db.insert_employee("Ada").unwrap().id;
        db.set_busy_timeout(Duration::from_millis(20)).unwrap();

        let holder = Connection::open(&path).unwrap();
        holder.execute_batch("BEGIN IMMEDIATE;").unwrap();

        let err = db
            .save(AttendanceRecord::open(emp, d(15), t(9, 0, 0)))
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(AttendanceError::from(err).is_retryable());

        holder.execute_batch("ROLLBACK;").unwrap();
        db.save(AttendanceRecord::open(emp, d(15), t(9, 0, 0)))
            .unwrap();
    }
}
