use crate::config::{Company, Config};
use crate::error::{ServiceError, StoreError};
use crate::request::GenerateRequest;
use crate::schedule::{find_anomalies, schedule, GovernanceCycle, GovernanceParams, ScheduleAnomaly};
use crate::store::{TaskRecord, TaskStore};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::retry::retry_with_backoff;

/// Successful generation, shaped like the endpoint's response body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutcome {
    pub success: bool,
    pub company_id: String,
    pub cycle_year: i32,
    pub tasks_created: usize,
    pub tasks: Vec<TaskRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<ScheduleAnomaly>,
}

#[derive(Debug)]
pub struct BulkReport {
    pub results: Vec<CompanyResult>,
    pub total_duration: Duration,
}

impl BulkReport {
    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, CycleStatus::Failed { .. }))
            .count()
    }
}

#[derive(Debug)]
pub struct CompanyResult {
    pub company_id: String,
    pub status: CycleStatus,
    pub outcome: Option<GenerateOutcome>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleStatus {
    Completed { tasks_created: usize },
    Failed { error: String },
}

impl std::fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleStatus::Completed { tasks_created } => {
                write!(f, "completed: {} tasks", tasks_created)
            }
            CycleStatus::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

/// Loads a company, schedules its cycle and replaces the stored tasks
pub struct TimelineService<S: TaskStore> {
    config: Config,
    store: Arc<S>,
}

impl<S: TaskStore> TimelineService<S> {
    pub fn new(config: Config, store: Arc<S>) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Governance timing for a company: its overrides, else config defaults
    pub fn params_for(&self, company: &Company) -> GovernanceParams {
        company.governance.resolve(self.config.governance.params())
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome, ServiceError> {
        request.validate()?;

        let company = self
            .config
            .find_company(&request.company_id)
            .ok_or_else(|| ServiceError::UnknownCompany(request.company_id.clone()))?;

        info!(
            "Generating timeline for company: {} year: {}",
            company.id, request.cycle_year
        );

        let cycle = GovernanceCycle::new(
            company.id.as_str(),
            &company.fiscal_year_end,
            request.cycle_year,
            self.params_for(company),
        )?;
        let obligations = schedule(&cycle)?;

        let anomalies = find_anomalies(&obligations);
        for anomaly in &anomalies {
            warn!("{} cycle {}: {}", company.id, request.cycle_year, anomaly);
        }

        let records: Vec<TaskRecord> = obligations
            .iter()
            .map(|task| TaskRecord::from_obligation(&company.id, task))
            .collect();
        for record in &records {
            debug!("  {} due {} ({})", record.task_type, record.due_date, record.owner_role);
        }

        let tasks = retry_with_backoff(&self.config.retry, StoreError::is_transient, || {
            self.store
                .replace_tasks_for_cycle(&company.id, request.cycle_year, records.clone())
        })
        .await?;

        info!("Created {} tasks", tasks.len());

        Ok(GenerateOutcome {
            success: true,
            company_id: company.id.clone(),
            cycle_year: request.cycle_year,
            tasks_created: tasks.len(),
            tasks,
            anomalies,
        })
    }

    /// Regenerate the cycle of every configured company
    pub async fn generate_all(&self, cycle_year: i32) -> BulkReport {
        let start = Instant::now();

        info!(
            "Regenerating {} companies for {} with concurrency {}",
            self.config.companies.len(),
            cycle_year,
            self.config.concurrency
        );

        let mut results: Vec<CompanyResult> = stream::iter(&self.config.companies)
            .map(|company| async move {
                let request = GenerateRequest::new(company.id.as_str(), cycle_year);
                match self.generate(&request).await {
                    Ok(outcome) => CompanyResult {
                        company_id: company.id.clone(),
                        status: CycleStatus::Completed {
                            tasks_created: outcome.tasks_created,
                        },
                        outcome: Some(outcome),
                    },
                    Err(e) => {
                        warn!("Timeline generation failed for {}: {}", company.id, e);
                        CompanyResult {
                            company_id: company.id.clone(),
                            status: CycleStatus::Failed {
                                error: e.to_string(),
                            },
                            outcome: None,
                        }
                    }
                }
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        results.sort_by(|a, b| a.company_id.cmp(&b.company_id));

        BulkReport {
            results,
            total_duration: start.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use crate::error::RequestError;
    use crate::schedule::{GovernanceOverrides, ObligationType};
    use crate::store::{MemoryStore, TaskStatus};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn company(id: &str, fye: &str, overrides: GovernanceOverrides) -> Company {
        Company {
            id: id.to_string(),
            name: String::new(),
            fiscal_year_end: fye.to_string(),
            governance: overrides,
        }
    }

    fn config() -> Config {
        Config {
            retry: RetryConfig {
                max_attempts: 3,
                backoff_base_ms: 1,
            },
            companies: vec![
                company("acme", "2023-12-31", GovernanceOverrides::default()),
                company(
                    "globex",
                    "2023-12-31",
                    GovernanceOverrides {
                        notice_period_days: Some(30),
                        approval_deadline_days: None,
                    },
                ),
                company("broken", "sometime", GovernanceOverrides::default()),
            ],
            ..Config::default()
        }
    }

    fn service() -> TimelineService<MemoryStore> {
        TimelineService::new(config(), Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_generate_creates_seven_tasks() {
        let service = service();
        let outcome = service
            .generate(&GenerateRequest::new("acme", 2024))
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.tasks_created, 7);
        assert!(outcome.anomalies.is_empty());
        assert_eq!(outcome.tasks[4].task_type, ObligationType::HoldAgm);
        assert_eq!(
            outcome.tasks[4].due_date,
            NaiveDate::from_ymd_opt(2025, 6, 22).unwrap()
        );
        assert!(outcome.tasks.iter().all(|t| t.status == TaskStatus::Todo));
    }

    #[tokio::test]
    async fn test_regeneration_replaces_previous_tasks() {
        let service = service();
        let first = service
            .generate(&GenerateRequest::new("acme", 2024))
            .await
            .unwrap();
        service
            .store()
            .update_status(&first.tasks[0].id, TaskStatus::Done)
            .await
            .unwrap();

        let second = service
            .generate(&GenerateRequest::new("acme", 2024))
            .await
            .unwrap();

        let stored = service.store().tasks_for_company("acme").await.unwrap();
        assert_eq!(stored.len(), 7);
        assert!(stored.iter().all(|t| t.status == TaskStatus::Todo));

        let due_first: Vec<_> = first.tasks.iter().map(|t| t.due_date).collect();
        let due_second: Vec<_> = second.tasks.iter().map(|t| t.due_date).collect();
        assert_eq!(due_first, due_second);
    }

    #[tokio::test]
    async fn test_company_overrides_flow_into_schedule() {
        let service = service();
        let outcome = service
            .generate(&GenerateRequest::new("globex", 2024))
            .await
            .unwrap();

        assert_eq!(
            outcome.tasks[3].metadata.description,
            "Must be sent at least 30 days before AGM"
        );
        assert_eq!(outcome.anomalies.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_overrides_schedule_like_defaults() {
        let mut config = config();
        config.companies.push(company(
            "zeroed",
            "2023-12-31",
            GovernanceOverrides {
                notice_period_days: Some(0),
                approval_deadline_days: Some(0),
            },
        ));
        let service = TimelineService::new(config, Arc::new(MemoryStore::new()));

        let outcome = service
            .generate(&GenerateRequest::new("zeroed", 2024))
            .await
            .unwrap();
        assert_eq!(
            outcome.tasks[3].due_date,
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
        );
        assert_eq!(
            outcome.tasks[4].due_date,
            NaiveDate::from_ymd_opt(2025, 6, 22).unwrap()
        );
    }

    #[tokio::test]
    async fn test_validation_failure_is_400() {
        let err = service()
            .generate(&GenerateRequest::new("acme", 1999))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Request(RequestError::Fields(_))));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_unknown_company_is_500() {
        let err = service()
            .generate(&GenerateRequest::new("initech", 2024))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownCompany(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_bad_fiscal_year_end_stores_nothing() {
        let service = service();
        let err = service
            .generate(&GenerateRequest::new("broken", 2024))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Schedule(_)));
        assert_eq!(service.store().len().await, 0);
    }

    #[tokio::test]
    async fn test_generate_all_reports_each_company() {
        let service = service();
        let report = service.generate_all(2024).await;

        let ids: Vec<_> = report.results.iter().map(|r| r.company_id.as_str()).collect();
        assert_eq!(ids, vec!["acme", "broken", "globex"]);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.results[0].status,
            CycleStatus::Completed { tasks_created: 7 }
        );
        assert_eq!(service.store().len().await, 14);
    }

    /// Fails the first write, then delegates
    struct FlakyStore {
        inner: MemoryStore,
        failures: AtomicU32,
    }

    #[async_trait]
    impl TaskStore for FlakyStore {
        async fn replace_tasks_for_cycle(
            &self,
            company_id: &str,
            cycle_year: i32,
            tasks: Vec<TaskRecord>,
        ) -> Result<Vec<TaskRecord>, StoreError> {
            if self.failures.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(StoreError::Io {
                    path: "remote".into(),
                    source: std::io::Error::new(std::io::ErrorKind::TimedOut, "slow"),
                });
            }
            self.inner
                .replace_tasks_for_cycle(company_id, cycle_year, tasks)
                .await
        }

        async fn tasks_for_company(&self, company_id: &str) -> Result<Vec<TaskRecord>, StoreError> {
            self.inner.tasks_for_company(company_id).await
        }

        async fn update_status(
            &self,
            task_id: &str,
            status: TaskStatus,
        ) -> Result<TaskRecord, StoreError> {
            self.inner.update_status(task_id, status).await
        }
    }

    #[tokio::test]
    async fn test_store_write_is_retried() {
        let store = Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            failures: AtomicU32::new(0),
        });
        let service = TimelineService::new(config(), store.clone());

        let outcome = service
            .generate(&GenerateRequest::new("acme", 2024))
            .await
            .unwrap();
        assert_eq!(outcome.tasks_created, 7);
        assert_eq!(store.failures.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unreadable_store_fails_without_retry() {
        struct CorruptStore(AtomicU32);

        #[async_trait]
        impl TaskStore for CorruptStore {
            async fn replace_tasks_for_cycle(
                &self,
                _company_id: &str,
                _cycle_year: i32,
                _tasks: Vec<TaskRecord>,
            ) -> Result<Vec<TaskRecord>, StoreError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
                Err(StoreError::Serialize(err))
            }

            async fn tasks_for_company(&self, _: &str) -> Result<Vec<TaskRecord>, StoreError> {
                Ok(Vec::new())
            }

            async fn update_status(
                &self,
                task_id: &str,
                _status: TaskStatus,
            ) -> Result<TaskRecord, StoreError> {
                Err(StoreError::TaskNotFound(task_id.to_string()))
            }
        }

        let mut config = config();
        config.retry.backoff_base_ms = 60_000;
        let corrupt = Arc::new(CorruptStore(AtomicU32::new(0)));
        let service = TimelineService::new(config, corrupt.clone());

        let err = service
            .generate(&GenerateRequest::new("acme", 2024))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Store(StoreError::Serialize(_))));
        assert_eq!(corrupt.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_outcome_json_shape() {
        let outcome = service()
            .generate(&GenerateRequest::new("acme", 2024))
            .await
            .unwrap();
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["tasksCreated"], 7);
        assert_eq!(json["tasks"].as_array().unwrap().len(), 7);
        assert!(json.get("anomalies").is_none());
    }
}
