//! Request boundary for timeline generation
//!
//! Shape and range checks live here, not in the scheduler: the cycle year
//! must fall in 2000..=2100 and the company id must be present.

use crate::error::{RequestError, ServiceError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MIN_CYCLE_YEAR: i32 = 2000;
pub const MAX_CYCLE_YEAR: i32 = 2100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub company_id: String,
    pub cycle_year: i32,
}

impl GenerateRequest {
    pub fn new(company_id: impl Into<String>, cycle_year: i32) -> Self {
        Self {
            company_id: company_id.into(),
            cycle_year,
        }
    }

    /// Parse and validate a JSON request body
    pub fn from_json(body: &str) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_str(body).map_err(|_| RequestError::InvalidJson)?;
        let fields = value.as_object().ok_or(RequestError::InvalidBody)?;

        let mut errors = Vec::new();

        let company_id = match fields.get("companyId") {
            None | Some(Value::Null) => {
                errors.push("companyId is required".to_string());
                None
            }
            Some(Value::String(s)) if s.is_empty() => {
                errors.push("companyId is required".to_string());
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push("companyId must be a string".to_string());
                None
            }
        };

        let cycle_year = match fields.get("cycleYear") {
            None | Some(Value::Null) => {
                errors.push("cycleYear is required".to_string());
                None
            }
            Some(Value::Number(n)) => {
                // Any JSON number is accepted; a fractional year is truncated
                let year = n.as_f64().unwrap_or(f64::NAN);
                let range_errors = year_range_errors(year);
                let in_range = range_errors.is_empty();
                errors.extend(range_errors);
                in_range.then(|| year.trunc() as i32)
            }
            Some(_) => {
                errors.push("cycleYear must be a number".to_string());
                None
            }
        };

        match (company_id, cycle_year) {
            (Some(company_id), Some(cycle_year)) if errors.is_empty() => Ok(Self {
                company_id,
                cycle_year,
            }),
            _ => Err(RequestError::Fields(errors)),
        }
    }

    /// Apply the boundary rules to an already-typed request
    pub fn validate(&self) -> Result<(), RequestError> {
        let mut errors = Vec::new();
        if self.company_id.is_empty() {
            errors.push("companyId is required".to_string());
        }
        errors.extend(year_range_errors(f64::from(self.cycle_year)));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RequestError::Fields(errors))
        }
    }
}

fn year_range_errors(year: f64) -> Vec<String> {
    if year.is_nan() {
        vec!["cycleYear must be a number".to_string()]
    } else if year < f64::from(MIN_CYCLE_YEAR) {
        vec![format!("cycleYear must be at least {}", MIN_CYCLE_YEAR)]
    } else if year > f64::from(MAX_CYCLE_YEAR) {
        vec![format!("cycleYear must be at most {}", MAX_CYCLE_YEAR)]
    } else {
        Vec::new()
    }
}

/// Structured failure body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
