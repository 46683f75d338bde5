use crate::reminders::{ReminderChannel, ReminderRule};
use crate::schedule::types::{DEFAULT_APPROVAL_DEADLINE_DAYS, DEFAULT_NOTICE_PERIOD_DAYS};
use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_store_path() -> PathBuf {
    PathBuf::from(".retroplan/tasks.json")
}

pub fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

pub fn default_concurrency() -> usize {
    4
}

pub fn default_notice_period_days() -> u32 {
    DEFAULT_NOTICE_PERIOD_DAYS as u32
}

pub fn default_approval_deadline_days() -> u32 {
    DEFAULT_APPROVAL_DEADLINE_DAYS as u32
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_backoff_base_ms() -> u64 {
    1000
}

pub fn default_reminders() -> Vec<ReminderRule> {
    [30, 14, 7, 1]
        .into_iter()
        .map(|days_before| ReminderRule {
            days_before,
            channel: ReminderChannel::Email,
            enabled: true,
        })
        .collect()
}
