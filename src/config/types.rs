use crate::reminders::ReminderRule;
use crate::schedule::{GovernanceOverrides, GovernanceParams};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// JSON file holding generated tasks
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Companies regenerated in parallel by `generate --all`
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default)]
    pub governance: GovernanceDefaults,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default = "default_reminders")]
    pub reminders: Vec<ReminderRule>,

    #[serde(default)]
    pub companies: Vec<Company>,
}

/// Timing used when a company's governance profile leaves a value unset
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct GovernanceDefaults {
    #[serde(default = "default_notice_period_days")]
    pub notice_period_days: u32,

    #[serde(default = "default_approval_deadline_days")]
    pub approval_deadline_days: u32,
}

impl Default for GovernanceDefaults {
    fn default() -> Self {
        Self {
            notice_period_days: default_notice_period_days(),
            approval_deadline_days: default_approval_deadline_days(),
        }
    }
}

impl GovernanceDefaults {
    /// Zero values fall back to the built-in 15/180
    pub fn params(&self) -> GovernanceParams {
        GovernanceOverrides {
            notice_period_days: Some(self.notice_period_days),
            approval_deadline_days: Some(self.approval_deadline_days),
        }
        .resolve(GovernanceParams::default())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Company {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Any past fiscal year end (`YYYY-MM-DD`); only month and day are used
    pub fiscal_year_end: String,

    #[serde(default)]
    pub governance: GovernanceOverrides,
}

impl Company {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
