use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::{company_tasks, replace_in, set_status, TaskRecord, TaskStatus, TaskStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct TaskFile {
    #[serde(default)]
    tasks: Vec<TaskRecord>,
}

/// Task table kept in a pretty-printed JSON file
///
/// Every operation reads, mutates and rewrites the file while holding the
/// store lock.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<TaskFile, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(TaskFile::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TaskFile::default()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn write(&self, file: &TaskFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| self.io_error(e))?;
        debug!("Wrote {} tasks to {:?}", file.tasks.len(), self.path);
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl TaskStore for FileStore {
    async fn replace_tasks_for_cycle(
        &self,
        company_id: &str,
        cycle_year: i32,
        tasks: Vec<TaskRecord>,
    ) -> Result<Vec<TaskRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;
        let created = replace_in(&mut file.tasks, company_id, cycle_year, tasks);
        self.write(&file).await?;
        Ok(created)
    }

    async fn tasks_for_company(&self, company_id: &str) -> Result<Vec<TaskRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        let file = self.read().await?;
        Ok(company_tasks(&file.tasks, company_id))
    }

    async fn update_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<TaskRecord, StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;
        let updated = set_status(&mut file.tasks, task_id, status)?;
        self.write(&file).await?;
        Ok(updated)
    }
}
