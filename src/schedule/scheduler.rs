//! Retro-planning: derives the dated obligations of one cycle
//!
//! Month arithmetic uses chrono's `checked_add_months`, which clamps to the
//! last day of a shorter target month (Dec 31 + 4 months = Apr 30). Day
//! arithmetic is plain calendar days.

use crate::error::ScheduleError;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate};
use tracing::debug;

use super::types::{GovernanceCycle, GovernanceParams, ObligationTask, ObligationType};

/// Parse a stored fiscal year end (`YYYY-MM-DD` or an RFC 3339 timestamp)
pub fn parse_fiscal_year_end(input: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_utc().date())
        .map_err(|_| ScheduleError::InvalidInput(format!("unparseable fiscal year end '{}'", input)))
}

impl GovernanceCycle {
    pub fn new(
        company_id: impl Into<String>,
        fiscal_year_end: &str,
        cycle_year: i32,
        params: GovernanceParams,
    ) -> Result<Self, ScheduleError> {
        let fye = parse_fiscal_year_end(fiscal_year_end)?;
        Ok(Self {
            company_id: company_id.into(),
            fiscal_year_end_month: fye.month(),
            fiscal_year_end_day: fye.day(),
            cycle_year,
            params,
        })
    }

    /// The fiscal year end inside the cycle year
    ///
    /// Counted as days from the first of the month, so a day missing from
    /// that year rolls forward (Feb 29 becomes Mar 1).
    pub fn anchor(&self) -> Result<NaiveDate, ScheduleError> {
        let month_start = NaiveDate::from_ymd_opt(self.cycle_year, self.fiscal_year_end_month, 1)
            .ok_or_else(|| {
                ScheduleError::InvalidInput(format!(
                    "no month {} in year {}",
                    self.fiscal_year_end_month, self.cycle_year
                ))
            })?;

        let offset = i64::from(self.fiscal_year_end_day.saturating_sub(1));
        shift_days(month_start, offset)
    }
}

/// Compute the seven obligations of a cycle, in fixed type order
pub fn schedule(cycle: &GovernanceCycle) -> Result<Vec<ObligationTask>, ScheduleError> {
    let fye = cycle.anchor()?;
    let params = &cycle.params;

    let collect_inputs = shift_months(fye, 4)?;
    let collect_accounts = shift_days(shift_months(fye, 4)?, 15)?;
    let draft_pack = shift_months(fye, 5)?;

    // Months approximated as 30 days, floored
    let convocation_months = params.approval_deadline_days.div_euclid(30);
    let convocation_lead = params
        .notice_period_days
        .checked_add(5)
        .and_then(i64::checked_neg)
        .ok_or_else(|| out_of_range("notice period"))?;
    let send_convocations = shift_days(shift_months(fye, convocation_months)?, convocation_lead)?;

    let agm_offset = params
        .approval_deadline_days
        .checked_sub(7)
        .ok_or_else(|| out_of_range("approval deadline"))?;
    let hold_agm = shift_days(fye, agm_offset)?;
    let file_accounts = shift_months(hold_agm, 1)?;
    let archive = shift_days(file_accounts, 14)?;

    let dates = [
        collect_inputs,
        collect_accounts,
        draft_pack,
        send_convocations,
        hold_agm,
        file_accounts,
        archive,
    ];

    let tasks: Vec<ObligationTask> = ObligationType::ALL
        .iter()
        .zip(dates)
        .map(|(kind, due_date)| ObligationTask {
            obligation_type: *kind,
            title: kind.title().to_string(),
            due_date,
            owner_role: kind.owner_role(),
            description: kind.description(params),
            cycle_year: cycle.cycle_year,
        })
        .collect();

    debug!(
        "Scheduled {} obligations for {} cycle {} (anchor {})",
        tasks.len(),
        cycle.company_id,
        cycle.cycle_year,
        fye
    );

    Ok(tasks)
}

/// Parse the fiscal year end and schedule in one call
pub fn plan_obligations(
    fiscal_year_end: &str,
    cycle_year: i32,
    params: GovernanceParams,
) -> Result<Vec<ObligationTask>, ScheduleError> {
    let cycle = GovernanceCycle::new("", fiscal_year_end, cycle_year, params)?;
    schedule(&cycle)
}

fn shift_months(date: NaiveDate, months: i64) -> Result<NaiveDate, ScheduleError> {
    let amount = u32::try_from(months.unsigned_abs()).map_err(|_| out_of_range("month offset"))?;
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(amount))
    } else {
        date.checked_sub_months(Months::new(amount))
    };
    shifted.ok_or_else(|| out_of_range("month offset"))
}

fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, ScheduleError> {
    let amount = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(amount)
    } else {
        date.checked_sub_days(amount)
    };
    shifted.ok_or_else(|| out_of_range("day offset"))
}

fn out_of_range(what: &str) -> ScheduleError {
    ScheduleError::InvalidInput(format!("{} leaves the supported date range", what))
}
