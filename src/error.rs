use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Company '{company}' has an invalid fiscal year end: {source}")]
    InvalidFiscalYearEnd {
        company: String,
        #[source]
        source: ScheduleError,
    },

    #[error("Company id must not be empty")]
    EmptyCompanyId,

    #[error("Company '{0}' is declared more than once")]
    DuplicateCompany(String),

    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Rejections at the request boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("{}", .0.join(", "))]
    Fields(Vec<String>),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Task '{0}' not found")]
    TaskNotFound(String),

    #[error("Failed to access task store '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Request(#[from] RequestError),

    #[error("Company '{0}' not found")]
    UnknownCompany(String),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl StoreError {
    /// Whether another attempt could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Io { .. })
    }
}

impl ServiceError {
    /// HTTP-style status: 400 for rejected requests, 500 otherwise
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Request(_) => 400,
            _ => 500,
        }
    }
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
