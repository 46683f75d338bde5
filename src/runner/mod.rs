mod retry;
mod service;

pub use service::{BulkReport, CompanyResult, CycleStatus, GenerateOutcome, TimelineService};
