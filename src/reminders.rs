//! Reminder planning ahead of task due dates
//!
//! Only dates are computed here; delivery over email or Slack belongs to
//! whoever consumes the plan.

use crate::schedule::ObligationType;
use crate::store::TaskRecord;
use chrono::{Days, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderChannel {
    Email,
    Slack,
}

impl std::fmt::Display for ReminderChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderChannel::Email => write!(f, "EMAIL"),
            ReminderChannel::Slack => write!(f, "SLACK"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ReminderRule {
    pub days_before: u32,

    pub channel: ReminderChannel,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub task_id: String,
    pub task_type: ObligationType,
    pub title: String,
    pub due_date: NaiveDate,
    pub remind_on: NaiveDate,
    pub days_before: u32,
    pub channel: ReminderChannel,
}

/// Every reminder for open tasks under enabled rules, earliest first
pub fn plan_reminders(tasks: &[TaskRecord], rules: &[ReminderRule]) -> Vec<Reminder> {
    let mut reminders: Vec<Reminder> = tasks
        .iter()
        .filter(|task| !task.is_done())
        .flat_map(|task| {
            rules
                .iter()
                .filter(|rule| rule.enabled)
                .filter_map(move |rule| {
                    let remind_on = task
                        .due_date
                        .checked_sub_days(Days::new(u64::from(rule.days_before)))?;
                    Some(Reminder {
                        task_id: task.id.clone(),
                        task_type: task.task_type,
                        title: task.title.clone(),
                        due_date: task.due_date,
                        remind_on,
                        days_before: rule.days_before,
                        channel: rule.channel,
                    })
                })
        })
        .collect();

    reminders.sort_by(|a, b| {
        a.remind_on
            .cmp(&b.remind_on)
            .then(a.due_date.cmp(&b.due_date))
    });
    reminders
}

/// Reminders that fire on `today`
pub fn reminders_due(tasks: &[TaskRecord], rules: &[ReminderRule], today: NaiveDate) -> Vec<Reminder> {
    plan_reminders(tasks, rules)
        .into_iter()
        .filter(|r| r.remind_on == today)
        .collect()
}
