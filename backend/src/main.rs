//! `vacation_check <input.json>`
//!
//! Reads a policy and a date selection, then prints the submission outcome
//! and usage stats as JSON. Exits with status 2 when the selection would be
//! rejected.

use std::collections::HashSet;
use std::process::ExitCode;
use std::{env, fs};

use anyhow::Context;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shiftplan_backend::{
    config::Config,
    models::calendar_date::CalendarDate,
    models::vacation_policy::VacationPolicy,
    services::vacation_stats::{get_stats, VacationStats},
    services::vacation_validator::{can_select_date, validate_submission, ValidationOutcome},
    utils::time::{in_timezone, system_clock},
};

#[derive(Debug, Deserialize)]
struct CheckInput {
    policy: VacationPolicy,
    #[serde(default)]
    selected_dates: Vec<CalendarDate>,
    #[serde(default)]
    candidate: Option<CalendarDate>,
}

#[derive(Debug, Serialize)]
struct CandidateReport {
    date: CalendarDate,
    permitted: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    period: String,
    checked_at: DateTime<Tz>,
    deadline: DateTime<Tz>,
    outcome: ValidationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    stats: VacationStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidate: Option<CandidateReport>,
}

fn build_report(input: &CheckInput, now: DateTime<Utc>, tz: &Tz) -> CheckReport {
    let (year, month) = input.policy.period();
    let selection: HashSet<CalendarDate> = input.selected_dates.iter().copied().collect();

    let outcome = validate_submission(&input.policy, &selection, year, month, now);
    let stats = get_stats(&input.policy, &selection, year, month);
    let candidate = input.candidate.map(|date| CandidateReport {
        date,
        permitted: can_select_date(&input.policy, date, &selection),
    });

    CheckReport {
        period: format!("{:04}-{:02}", year, month),
        checked_at: in_timezone(now, tz),
        deadline: in_timezone(input.policy.deadline(), tz),
        outcome,
        message: outcome.message(),
        stats,
        candidate,
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shiftplan_backend=debug,vacation_check=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    tracing::debug!(time_zone = %config.time_zone, "Loaded configuration from environment/.env");

    let path = env::args()
        .nth(1)
        .context("usage: vacation_check <input.json>")?;
    let raw = fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let input: CheckInput =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))?;

    let clock = system_clock();
    let report = build_report(&input, clock(), &config.time_zone);
    tracing::info!(
        period = %report.period,
        outcome = report.outcome.code(),
        selected_days = report.stats.selected_days,
        "Checked vacation selection"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if report.outcome.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
