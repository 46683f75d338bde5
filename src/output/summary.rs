use crate::error::OutputError;
use crate::schedule::ObligationType;
use crate::store::{TaskRecord, TaskStatus};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const UPCOMING_LIMIT: usize = 3;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub timestamp: String,
    pub company_id: String,
    pub as_of: NaiveDate,
    pub total: usize,
    pub completed: usize,
    pub completion_percent: u32,
    pub overdue: Vec<TaskLine>,
    pub upcoming: Vec<TaskLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskLine {
    pub id: String,
    #[serde(rename = "type")]
    pub task_type: ObligationType,
    pub title: String,
    pub cycle_year: i32,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

impl From<&TaskRecord> for TaskLine {
    fn from(task: &TaskRecord) -> Self {
        Self {
            id: task.id.clone(),
            task_type: task.task_type,
            title: task.title.clone(),
            cycle_year: task.cycle_year,
            due_date: task.due_date,
            status: task.status,
        }
    }
}

/// Progress of a company's tasks as of `today`
pub fn summarize(company_id: &str, tasks: &[TaskRecord], today: NaiveDate) -> ProgressSummary {
    let completed = tasks.iter().filter(|t| t.is_done()).count();
    let completion_percent = if tasks.is_empty() {
        0
    } else {
        (completed * 100 / tasks.len()) as u32
    };

    let mut open: Vec<&TaskRecord> = tasks.iter().filter(|t| !t.is_done()).collect();
    open.sort_by_key(|t| t.due_date);

    let overdue = open
        .iter()
        .filter(|t| t.is_overdue(today))
        .map(|t| TaskLine::from(*t))
        .collect();

    let upcoming = open
        .iter()
        .take(UPCOMING_LIMIT)
        .map(|t| TaskLine::from(*t))
        .collect();

    ProgressSummary {
        timestamp: Utc::now().to_rfc3339(),
        company_id: company_id.to_string(),
        as_of: today,
        total: tasks.len(),
        completed,
        completion_percent,
        overdue,
        upcoming,
    }
}

pub fn write_summary(report_dir: &Path, summary: &ProgressSummary) -> Result<(), OutputError> {
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let json_path = report_dir.join(format!("{}-summary.json", summary.company_id));
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    let md_path = report_dir.join(format!("{}-summary.md", summary.company_id));
    fs::write(&md_path, build_summary_markdown(summary)).map_err(OutputError::WriteReport)?;

    Ok(())
}

pub fn build_summary_markdown(summary: &ProgressSummary) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {} progress\n\n", summary.company_id));
    md.push_str(&format!("**Generated:** {}\n", summary.timestamp));
    md.push_str(&format!("**As of:** {}\n", summary.as_of));
    md.push_str(&format!(
        "**Completed:** {} of {} tasks ({}%)\n\n",
        summary.completed, summary.total, summary.completion_percent
    ));

    if !summary.overdue.is_empty() {
        md.push_str(&format!("## Overdue ({})\n\n", summary.overdue.len()));
        push_task_table(&mut md, &summary.overdue);
    }

    md.push_str("## Upcoming\n\n");
    if summary.upcoming.is_empty() {
        md.push_str("*Nothing left to do*\n");
    } else {
        push_task_table(&mut md, &summary.upcoming);
    }

    md
}

fn push_task_table(md: &mut String, lines: &[TaskLine]) {
    md.push_str("| Due | Task | Cycle | Status |\n");
    md.push_str("|-----|------|-------|--------|\n");
    for line in lines {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            line.due_date, line.title, line.cycle_year, line.status
        ));
    }
    md.push('\n');
}
