use crate::schedule::{ObligationTask, ObligationType, OwnerRole};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow state of a persisted task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Blocked,
    Late,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "TODO"),
            TaskStatus::InProgress => write!(f, "IN_PROGRESS"),
            TaskStatus::Done => write!(f, "DONE"),
            TaskStatus::Blocked => write!(f, "BLOCKED"),
            TaskStatus::Late => write!(f, "LATE"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "TODO" => Ok(TaskStatus::Todo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "DONE" => Ok(TaskStatus::Done),
            "BLOCKED" => Ok(TaskStatus::Blocked),
            "LATE" => Ok(TaskStatus::Late),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskMetadata {
    #[serde(default)]
    pub description: String,
}

/// A generated obligation as the workflow persists it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskRecord {
    pub id: String,

    pub company_id: String,

    pub cycle_year: i32,

    #[serde(rename = "type")]
    pub task_type: ObligationType,

    pub title: String,

    pub due_date: NaiveDate,

    pub owner_role: OwnerRole,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub metadata: TaskMetadata,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Fresh `TODO` record for a scheduled obligation
    pub fn from_obligation(company_id: &str, task: &ObligationTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            company_id: company_id.to_string(),
            cycle_year: task.cycle_year,
            task_type: task.obligation_type,
            title: task.title.clone(),
            due_date: task.due_date,
            owner_role: task.owner_role,
            status: TaskStatus::Todo,
            metadata: TaskMetadata {
                description: task.description.clone(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Not done and due strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.due_date < today
    }
}
