use crate::error::OutputError;
use crate::runner::GenerateOutcome;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a generated timeline as Markdown plus the raw outcome as JSON
pub fn write_timeline_report(
    report_dir: &Path,
    outcome: &GenerateOutcome,
) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let stem = format!("{}-{}", outcome.company_id, outcome.cycle_year);

    let report_path = report_dir.join(format!("{}.md", stem));
    fs::write(&report_path, build_timeline_markdown(outcome)).map_err(OutputError::WriteReport)?;

    let json_path = report_dir.join(format!("{}.json", stem));
    let json = serde_json::to_string_pretty(outcome)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    Ok(report_path)
}

pub fn build_timeline_markdown(outcome: &GenerateOutcome) -> String {
    let mut content = String::new();

    content.push_str(&format!(
        "# {} governance timeline {}\n\n",
        outcome.company_id, outcome.cycle_year
    ));

    content.push_str("| Due | Obligation | Owner | Status |\n");
    content.push_str("|-----|------------|-------|--------|\n");
    for task in &outcome.tasks {
        content.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            task.due_date, task.title, task.owner_role, task.status
        ));
    }
    content.push_str("\n---\n\n");

    for task in &outcome.tasks {
        content.push_str(&format!("### {} `{}`\n\n", task.title, task.task_type));
        content.push_str(&format!("{}\n\n", task.metadata.description));
    }

    if !outcome.anomalies.is_empty() {
        content.push_str("## Schedule warnings\n\n");
        for anomaly in &outcome.anomalies {
            content.push_str(&format!("- {}\n", anomaly));
        }
        content.push('\n');
    }

    content
}
