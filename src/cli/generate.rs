//! CLI handler for the `generate` subcommand
//!
//! Mirrors the timeline endpoint: the outcome (or `{"error": ...}`) goes to
//! stdout as JSON; rejected requests exit with 2, other failures with 1.

use crate::cli::{load_config, open_store, GenerateArgs};
use crate::error::{RequestError, ServiceError};
use crate::output::write_timeline_report;
use crate::request::{ErrorResponse, GenerateRequest};
use crate::runner::{GenerateOutcome, TimelineService};
use crate::store::FileStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

pub async fn execute(args: GenerateArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let report_dir = config.report_dir.clone();
    let store = Arc::new(open_store(&config));
    let service = TimelineService::new(config, store);

    if args.all {
        let Some(cycle_year) = args.cycle_year else {
            anyhow::bail!("--all needs --cycle-year");
        };
        let reports = args.report.then_some(report_dir.as_path());
        return generate_all(&service, cycle_year, reports).await;
    }

    let result = match build_request(&args) {
        Ok(request) => service.generate(&request).await,
        Err(e) => Err(ServiceError::from(e)),
    };

    match result {
        Ok(outcome) => {
            if args.report {
                write_report(&report_dir, &outcome);
            }
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Err(e) => {
            error!("Error in generate: {}", e);
            println!("{}", serde_json::to_string(&ErrorResponse::from(&e))?);
            let code = if e.status_code() == 400 { 2 } else { 1 };
            std::process::exit(code);
        }
    }
}

fn build_request(args: &GenerateArgs) -> Result<GenerateRequest, RequestError> {
    if let Some(body) = &args.body {
        return GenerateRequest::from_json(body);
    }

    let mut errors = Vec::new();
    if args.company.as_deref().unwrap_or("").is_empty() {
        errors.push("companyId is required".to_string());
    }
    if args.cycle_year.is_none() {
        errors.push("cycleYear is required".to_string());
    }

    match (&args.company, args.cycle_year) {
        (Some(company), Some(cycle_year)) if errors.is_empty() => {
            Ok(GenerateRequest::new(company.as_str(), cycle_year))
        }
        _ => Err(RequestError::Fields(errors)),
    }
}

async fn generate_all(
    service: &TimelineService<FileStore>,
    cycle_year: i32,
    report_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let report = service.generate_all(cycle_year).await;

    for result in &report.results {
        println!("{:<24} {}", result.company_id, result.status);
        if let (Some(dir), Some(outcome)) = (report_dir, &result.outcome) {
            write_report(dir, outcome);
        }
    }

    info!(
        "Regenerated {} companies in {:.1}s ({} failed)",
        report.results.len(),
        report.total_duration.as_secs_f64(),
        report.failed()
    );

    if report.failed() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn write_report(report_dir: &Path, outcome: &GenerateOutcome) {
    match write_timeline_report(report_dir, outcome) {
        Ok(path) => info!("Wrote report: {}", path.display()),
        Err(e) => warn!("Failed to write report for {}: {}", outcome.company_id, e),
    }
}
