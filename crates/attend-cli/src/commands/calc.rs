//! Duration calculators that do not touch the database.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveTime;
use clap::Subcommand;

use attend_core::{
    DEFAULT_STANDARD_WORK_HOURS, OvertimePolicy, elapsed, overtime, overtime_by_total_work,
};

use crate::Config;
use crate::commands::util::parse_time_of_day;

#[derive(Debug, Subcommand)]
pub enum CalcAction {
    /// Time worked between two times of day.
    Elapsed {
        #[arg(value_parser = parse_time_of_day)]
        start: NaiveTime,
        #[arg(value_parser = parse_time_of_day)]
        end: NaiveTime,
    },
    /// Overtime past the standard end of day.
    Overtime {
        #[arg(value_parser = parse_time_of_day)]
        start: NaiveTime,
        #[arg(value_parser = parse_time_of_day)]
        end: NaiveTime,
        /// Standard end of day. Defaults to the configured value.
        #[arg(long, value_parser = parse_time_of_day)]
        standard_end: Option<NaiveTime>,
    },
    /// Overtime beyond a number of standard working hours.
    OvertimeByTotal {
        #[arg(value_parser = parse_time_of_day)]
        start: NaiveTime,
        #[arg(value_parser = parse_time_of_day)]
        end: NaiveTime,
        /// Standard working hours. Defaults to the configured value.
        #[arg(long)]
        hours: Option<u32>,
    },
}

pub fn run<W: Write>(writer: &mut W, action: &CalcAction, config: &Config) -> Result<()> {
    let result = match *action {
        CalcAction::Elapsed { start, end } => elapsed(start, end),
        CalcAction::Overtime {
            start,
            end,
            standard_end,
        } => overtime(
            start,
            end,
            standard_end.unwrap_or(config.policy.standard_end),
        ),
        CalcAction::OvertimeByTotal { start, end, hours } => {
            let configured = match config.policy.overtime {
                OvertimePolicy::ExceedsStandardHours {
                    standard_work_hours,
                } => standard_work_hours,
                OvertimePolicy::AfterStandardEnd => DEFAULT_STANDARD_WORK_HOURS,
            };
            overtime_by_total_work(start, end, hours.unwrap_or(configured))
        }
    };
    writeln!(writer, "{result}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        parse_time_of_day(s).unwrap()
    }

    fn calc(action: &CalcAction, config: &Config) -> String {
        let mut output = Vec::new();
        run(&mut output, action, config).unwrap();
        String::from_utf8(output).unwrap().trim_end().to_string()
    }

    #[test]
    fn elapsed_handles_overnight() {
        let action = CalcAction::Elapsed {
            start: t("22:00"),
            end: t("06:00"),
        };
        assert_eq!(calc(&action, &Config::default()), "8:00:01");
    }

    #[test]
    fn overtime_uses_configured_standard_end() {
        let action = CalcAction::Overtime {
            start: t("08:00"),
            end: t("19:30"),
            standard_end: None,
        };
        assert_eq!(calc(&action, &Config::default()), "2:30:00");

        let action = CalcAction::Overtime {
            start: t("08:00"),
            end: t("19:30"),
            standard_end: Some(t("19:00")),
        };
        assert_eq!(calc(&action, &Config::default()), "0:30:00");
    }

    #[test]
    fn overtime_by_total_defaults_to_eight_hours() {
        let action = CalcAction::OvertimeByTotal {
            start: t("09:00"),
            end: t("19:00"),
            hours: None,
        };
        assert_eq!(calc(&action, &Config::default()), "2:00:00");

        let mut config = Config::default();
        config.policy.overtime = OvertimePolicy::ExceedsStandardHours {
            standard_work_hours: 7,
        };
        assert_eq!(calc(&action, &config), "3:00:00");
    }
}
