//! Persistence for generated tasks
//!
//! Regeneration is a full replace: every task of a (company, cycle year)
//! pair is dropped before the new set goes in. Implementations hold one lock
//! across both steps so concurrent regenerations of a pair cannot interleave.

pub mod file;
pub mod memory;
pub mod record;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{TaskMetadata, TaskRecord, TaskStatus};

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Delete every task of the pair, then insert `tasks`
    async fn replace_tasks_for_cycle(
        &self,
        company_id: &str,
        cycle_year: i32,
        tasks: Vec<TaskRecord>,
    ) -> Result<Vec<TaskRecord>, StoreError>;

    /// All tasks of a company, earliest due date first
    async fn tasks_for_company(&self, company_id: &str) -> Result<Vec<TaskRecord>, StoreError>;

    async fn update_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<TaskRecord, StoreError>;
}

/// Shared table operations used by every store
pub(crate) fn replace_in(
    table: &mut Vec<TaskRecord>,
    company_id: &str,
    cycle_year: i32,
    tasks: Vec<TaskRecord>,
) -> Vec<TaskRecord> {
    table.retain(|t| !(t.company_id == company_id && t.cycle_year == cycle_year));
    table.extend(tasks.iter().cloned());
    tasks
}

pub(crate) fn company_tasks(table: &[TaskRecord], company_id: &str) -> Vec<TaskRecord> {
    let mut tasks: Vec<TaskRecord> = table
        .iter()
        .filter(|t| t.company_id == company_id)
        .cloned()
        .collect();
    tasks.sort_by_key(|t| t.due_date);
    tasks
}

pub(crate) fn set_status(
    table: &mut [TaskRecord],
    task_id: &str,
    status: TaskStatus,
) -> Result<TaskRecord, StoreError> {
    let task = table
        .iter_mut()
        .find(|t| t.id == task_id)
        .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))?;
    task.status = status;
    task.updated_at = Utc::now();
    Ok(task.clone())
}
