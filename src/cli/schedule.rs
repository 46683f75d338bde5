//! CLI handler for the `schedule` subcommand: pure computation, no store

use crate::cli::{OutputFormat, ScheduleArgs};
use crate::schedule::{find_anomalies, plan_obligations, GovernanceParams, ObligationTask};
use tracing::warn;

pub fn execute(args: ScheduleArgs) -> anyhow::Result<()> {
    // 0 means "not supplied", as for stored governance profiles
    let defaults = GovernanceParams::default();
    let params = GovernanceParams {
        notice_period_days: args
            .notice_period_days
            .filter(|days| *days != 0)
            .unwrap_or(defaults.notice_period_days),
        approval_deadline_days: args
            .approval_deadline_days
            .filter(|days| *days != 0)
            .unwrap_or(defaults.approval_deadline_days),
    };

    let tasks = plan_obligations(&args.fiscal_year_end, args.cycle_year, params)?;

    for anomaly in find_anomalies(&tasks) {
        warn!("{}", anomaly);
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
        OutputFormat::Table => print_table(&tasks),
    }

    Ok(())
}

fn print_table(tasks: &[ObligationTask]) {
    println!("{:<20} {:<12} {:<11} TITLE", "TYPE", "DUE", "OWNER");
    for task in tasks {
        println!(
            "{:<20} {:<12} {:<11} {}",
            task.obligation_type.to_string(),
            task.due_date.to_string(),
            task.owner_role.to_string(),
            task.title
        );
    }
}
