mod report;
mod summary;

pub use report::{build_timeline_markdown, write_timeline_report};
pub use summary::{build_summary_markdown, summarize, write_summary, ProgressSummary};
