//! Employee management commands.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Subcommand;

use crate::Config;
use crate::commands::util::open_database;

#[derive(Debug, Subcommand)]
pub enum EmployeeAction {
    /// Add an employee.
    Add {
        /// Display name.
        name: String,
    },
    /// List employees.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

pub fn run<W: Write>(writer: &mut W, action: &EmployeeAction, config: &Config) -> Result<()> {
    match action {
        EmployeeAction::Add { name } => add(writer, name, config),
        EmployeeAction::List { json } => list(writer, *json, config),
    }
}

fn add<W: Write>(writer: &mut W, name: &str, config: &Config) -> Result<()> {
    if name.trim().is_empty() {
        bail!("employee name cannot be empty");
    }
    let mut db = open_database(config)?;
    let employee = db.insert_employee(name)?;
    writeln!(writer, "Added employee {}: {}", employee.id, employee.name)?;
    Ok(())
}

fn list<W: Write>(writer: &mut W, json: bool, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let employees = db.list_employees()?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&employees)?)?;
        return Ok(());
    }

    if employees.is_empty() {
        writeln!(writer, "No employees.")?;
        return Ok(());
    }
    for employee in employees {
        writeln!(writer, "{:>4}  {}", employee.id, employee.name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn config(temp: &tempfile::TempDir) -> Config {
        Config {
            database_path: temp.path().join("attend.db"),
            ..Config::default()
        }
    }

    #[test]
    fn add_then_list_employees() {
        let temp = tempfile::tempdir().unwrap();
        let config = config(&temp);
        let mut output = Vec::new();

        for name in ["Ada Lovelace", "Grace Hopper"] {
            let action = EmployeeAction::Add {
                name: name.to_string(),
            };
            run(&mut output, &action, &config).unwrap();
        }
        run(&mut output, &EmployeeAction::List { json: false }, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Added employee 1: Ada Lovelace
        Added employee 2: Grace Hopper
           1  Ada Lovelace
           2  Grace Hopper
        ");
    }

    #[test]
    fn list_json() {
        let temp = tempfile::tempdir().unwrap();
        let config = config(&temp);
        let mut sink = Vec::new();
        let action = EmployeeAction::Add {
            name: "Ada".to_string(),
        };
        run(&mut sink, &action, &config).unwrap();

        let mut output = Vec::new();
        run(&mut output, &EmployeeAction::List { json: true }, &config).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed, serde_json::json!([{"id": 1, "name": "Ada"}]));
    }

    #[test]
    fn list_empty() {
        let temp = tempfile::tempdir().unwrap();
        let mut output = Vec::new();
        run(&mut output, &EmployeeAction::List { json: false }, &config(&temp)).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No employees.\n");
    }

    #[test]
    fn add_rejects_blank_name() {
        let temp = tempfile::tempdir().unwrap();
        let mut output = Vec::new();
        let action = EmployeeAction::Add {
            name: "  ".to_string(),
        };
        let err = run(&mut output, &action, &config(&temp)).unwrap_err();
        assert!(err.to_string().contains("employee name cannot be empty"));
    }
}
