use crate::commands::{print_json, Context};
use crate::error::not_found;
use anyhow::{Context as _, Result};
use eventmgr_core::domain::Attendee;
use eventmgr_core::rules::stats::WEEKDAY_NAMES;
use eventmgr_core::rules::{target_day_of_week, target_time_of_day, Histogram};
use eventmgr_letters::Roster;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StatsReport {
    attendees: usize,
    time_of_day: Histogram,
    day_of_week: Histogram,
}

pub fn show_stats(ctx: &Context<'_>) -> Result<()> {
    let input = &ctx.config.input;
    if !input.exists() {
        return Err(not_found(format!("roster {}", input.display())));
    }

    let attendees: Vec<Attendee> = Roster::open(input)
        .and_then(|roster| roster.collect())
        .with_context(|| format!("read roster {}", input.display()))?;
    let report = StatsReport {
        attendees: attendees.len(),
        time_of_day: target_time_of_day(&attendees)?,
        day_of_week: target_day_of_week(&attendees)?,
    };

    if ctx.json {
        return print_json(&report);
    }

    for line in report_lines(&report) {
        println!("{line}");
    }
    Ok(())
}

fn report_lines(report: &StatsReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(2 + 24 + WEEKDAY_NAMES.len());
    lines.push(format!(
        "Registrations by hour ({} attendees):",
        report.attendees
    ));
    for hour in 0..24 {
        lines.push(format!("  {:02}:00  {}", hour, report.time_of_day.get(hour)));
    }

    lines.push("Registrations by weekday:".to_string());
    for (day, name) in WEEKDAY_NAMES.iter().enumerate() {
        lines.push(format!("  {:<9}  {}", name, report.day_of_week.get(day as u32)));
    }
    lines
}
