use crate::error::StoreError;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{company_tasks, replace_in, set_status, TaskRecord, TaskStatus, TaskStore};

/// In-process task table
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Mutex<Vec<TaskRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks across all companies
    pub async fn len(&self) -> usize {
        self.tasks.lock().await.len()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn replace_tasks_for_cycle(
        &self,
        company_id: &str,
        cycle_year: i32,
        tasks: Vec<TaskRecord>,
    ) -> Result<Vec<TaskRecord>, StoreError> {
        let mut table = self.tasks.lock().await;
        Ok(replace_in(&mut table, company_id, cycle_year, tasks))
    }

    async fn tasks_for_company(&self, company_id: &str) -> Result<Vec<TaskRecord>, StoreError> {
        let table = self.tasks.lock().await;
        Ok(company_tasks(&table, company_id))
    }

    async fn update_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<TaskRecord, StoreError> {
        let mut table = self.tasks.lock().await;
        set_status(&mut table, task_id, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{plan_obligations, GovernanceParams};

    fn records(company: &str, year: i32) -> Vec<TaskRecord> {
        plan_obligations("2024-12-31", year, GovernanceParams::default())
            .unwrap()
            .iter()
            .map(|t| TaskRecord::from_obligation(company, t))
            .collect()
    }

    #[tokio::test]
    async fn test_replace_drops_previous_cycle_tasks() {
        let store = MemoryStore::new();
        store
            .replace_tasks_for_cycle("acme", 2024, records("acme", 2024))
            .await
            .unwrap();
        let second = records("acme", 2024);
        let ids: Vec<String> = second.iter().map(|t| t.id.clone()).collect();
        store
            .replace_tasks_for_cycle("acme", 2024, second)
            .await
            .unwrap();

        let stored = store.tasks_for_company("acme").await.unwrap();
        assert_eq!(stored.len(), 7);
        assert!(stored.iter().all(|t| ids.contains(&t.id)));
    }

    #[tokio::test]
    async fn test_replace_leaves_other_pairs_alone() {
        let store = MemoryStore::new();
        store
            .replace_tasks_for_cycle("acme", 2024, records("acme", 2024))
            .await
            .unwrap();
        store
            .replace_tasks_for_cycle("acme", 2025, records("acme", 2025))
            .await
            .unwrap();
        store
            .replace_tasks_for_cycle("globex", 2024, records("globex", 2024))
            .await
            .unwrap();
        store
            .replace_tasks_for_cycle("acme", 2024, records("acme", 2024))
            .await
            .unwrap();

        assert_eq!(store.len().await, 21);
        assert_eq!(store.tasks_for_company("acme").await.unwrap().len(), 14);
    }

    #[tokio::test]
    async fn test_listing_sorted_by_due_date() {
        let store = MemoryStore::new();
        store
            .replace_tasks_for_cycle("acme", 2025, records("acme", 2025))
            .await
            .unwrap();
        store
            .replace_tasks_for_cycle("acme", 2024, records("acme", 2024))
            .await
            .unwrap();

        let stored = store.tasks_for_company("acme").await.unwrap();
        assert!(stored.windows(2).all(|w| w[0].due_date <= w[1].due_date));
        assert_eq!(stored[0].cycle_year, 2024);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = MemoryStore::new();
        let created = store
            .replace_tasks_for_cycle("acme", 2024, records("acme", 2024))
            .await
            .unwrap();

        let updated = store
            .update_status(&created[2].id, TaskStatus::Done)
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
        assert!(updated.updated_at >= created[2].updated_at);

        let err = store
            .update_status("missing", TaskStatus::Done)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::TaskNotFound(_)));
    }
}
