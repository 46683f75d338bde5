pub mod generate;
pub mod reminders;
pub mod schedule;
pub mod schema;
pub mod summary;
pub mod tasks;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;
use crate::store::{FileStore, TaskStatus};

#[derive(Parser)]
#[command(name = "retroplan")]
#[command(
    author,
    version,
    about = "Annual governance retro-planning for French SAS companies"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a cycle's obligations without touching the task store
    Schedule(ScheduleArgs),

    /// Generate (or regenerate) a company's timeline and store it
    Generate(GenerateArgs),

    /// List a company's stored tasks
    Tasks(TasksArgs),

    /// Change the status of one stored task
    Status(StatusArgs),

    /// Progress, overdue and upcoming tasks for a company
    Summary(SummaryArgs),

    /// Reminders due today, or the full reminder plan
    Reminders(RemindersArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Clone)]
pub struct ScheduleArgs {
    /// Fiscal year end of any year (YYYY-MM-DD); month and day are used
    #[arg(long)]
    pub fiscal_year_end: String,

    /// Calendar year of the cycle to plan
    #[arg(long)]
    pub cycle_year: i32,

    /// Days of notice before the AGM [default: 15]
    #[arg(long, allow_hyphen_values = true)]
    pub notice_period_days: Option<i64>,

    /// Days after year end to approve the accounts [default: 180]
    #[arg(long, allow_hyphen_values = true)]
    pub approval_deadline_days: Option<i64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Parser, Clone)]
pub struct GenerateArgs {
    /// Path to config file
    #[arg(short, long, default_value = "retroplan.yaml")]
    pub config: PathBuf,

    /// Company to generate for
    #[arg(long, conflicts_with_all = ["body", "all"])]
    pub company: Option<String>,

    /// Cycle year (2000-2100)
    #[arg(long, allow_hyphen_values = true)]
    pub cycle_year: Option<i32>,

    /// Raw JSON request body, e.g. '{"companyId":"acme","cycleYear":2024}'
    #[arg(long, conflicts_with = "all")]
    pub body: Option<String>,

    /// Regenerate every configured company
    #[arg(long)]
    pub all: bool,

    /// Also write Markdown/JSON reports under the report dir
    #[arg(long)]
    pub report: bool,
}

#[derive(Parser, Clone)]
pub struct TasksArgs {
    #[arg(short, long, default_value = "retroplan.yaml")]
    pub config: PathBuf,

    #[arg(long)]
    pub company: String,

    /// Only tasks of this cycle year
    #[arg(long)]
    pub cycle_year: Option<i32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Parser, Clone)]
pub struct StatusArgs {
    #[arg(short, long, default_value = "retroplan.yaml")]
    pub config: PathBuf,

    /// Task id
    #[arg(long)]
    pub task: String,

    /// TODO, IN_PROGRESS, DONE, BLOCKED or LATE
    #[arg(long)]
    pub status: TaskStatus,
}

#[derive(Parser, Clone)]
pub struct SummaryArgs {
    #[arg(short, long, default_value = "retroplan.yaml")]
    pub config: PathBuf,

    #[arg(long)]
    pub company: String,

    /// Reference date (defaults to today, UTC)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Write summary files under the report dir
    #[arg(long)]
    pub write: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Parser, Clone)]
pub struct RemindersArgs {
    #[arg(short, long, default_value = "retroplan.yaml")]
    pub config: PathBuf,

    #[arg(long)]
    pub company: String,

    /// Reference date (defaults to today, UTC)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Show every planned reminder instead of today's
    #[arg(long)]
    pub all: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Load and validate the config, falling back to defaults when absent
pub(crate) fn load_config(path: &std::path::Path) -> anyhow::Result<Config> {
    let config = Config::load_or_default(path)?;
    config.validate()?;
    Ok(config)
}

pub(crate) fn open_store(config: &Config) -> FileStore {
    FileStore::new(config.store_path.clone())
}

pub(crate) fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Utc::now().date_naive())
}
