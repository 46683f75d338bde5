//! Types for the annual obligation cycle

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTICE_PERIOD_DAYS: i64 = 15;
pub const DEFAULT_APPROVAL_DEADLINE_DAYS: i64 = 180;

/// Timing parameters of a governance profile
///
/// Defaults are bound here once (15 days notice, 180 days to approve the
/// accounts) so the scheduler never has to coalesce missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GovernanceParams {
    pub notice_period_days: i64,
    pub approval_deadline_days: i64,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            notice_period_days: DEFAULT_NOTICE_PERIOD_DAYS,
            approval_deadline_days: DEFAULT_APPROVAL_DEADLINE_DAYS,
        }
    }
}

/// Optional per-company overrides, as stored on a governance profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct GovernanceOverrides {
    #[serde(default)]
    pub notice_period_days: Option<u32>,

    #[serde(default)]
    pub approval_deadline_days: Option<u32>,
}

impl GovernanceOverrides {
    /// Fill absent fields from `base`; a stored `0` counts as absent
    pub fn resolve(&self, base: GovernanceParams) -> GovernanceParams {
        GovernanceParams {
            notice_period_days: self
                .notice_period_days
                .filter(|days| *days != 0)
                .map(i64::from)
                .unwrap_or(base.notice_period_days),
            approval_deadline_days: self
                .approval_deadline_days
                .filter(|days| *days != 0)
                .map(i64::from)
                .unwrap_or(base.approval_deadline_days),
        }
    }
}

/// One fiscal year's obligation cycle. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceCycle {
    pub company_id: String,
    pub fiscal_year_end_month: u32,
    pub fiscal_year_end_day: u32,
    pub cycle_year: i32,
    pub params: GovernanceParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObligationType {
    CollectYearInputs,
    CollectAccounts,
    DraftAgmPack,
    SendConvocations,
    HoldAgm,
    FileAccounts,
    Archive,
}

impl ObligationType {
    /// Every type, in cycle order
    pub const ALL: [ObligationType; 7] = [
        ObligationType::CollectYearInputs,
        ObligationType::CollectAccounts,
        ObligationType::DraftAgmPack,
        ObligationType::SendConvocations,
        ObligationType::HoldAgm,
        ObligationType::FileAccounts,
        ObligationType::Archive,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ObligationType::CollectYearInputs => "Provide year context and inputs",
            ObligationType::CollectAccounts => "Collect annual accounts from accountant",
            ObligationType::DraftAgmPack => "Draft AGM documentation pack",
            ObligationType::SendConvocations => "Send AGM convocations to shareholders",
            ObligationType::HoldAgm => "Hold Annual General Meeting",
            ObligationType::FileAccounts => "File accounts with the Greffe",
            ObligationType::Archive => "Archive governance documents",
        }
    }

    pub fn owner_role(&self) -> OwnerRole {
        match self {
            ObligationType::CollectAccounts => OwnerRole::Accountant,
            _ => OwnerRole::President,
        }
    }

    /// Explanatory text; the convocation entry quotes the notice period
    pub fn description(&self, params: &GovernanceParams) -> String {
        match self {
            ObligationType::CollectYearInputs => {
                "Answer questions about capital changes, dividends, notable events".to_string()
            }
            ObligationType::CollectAccounts => "Obtain balance sheet, P&L, and annexes".to_string(),
            ObligationType::DraftAgmPack => {
                "Prepare convocation, draft resolutions, PV template".to_string()
            }
            ObligationType::SendConvocations => format!(
                "Must be sent at least {} days before AGM",
                params.notice_period_days
            ),
            ObligationType::HoldAgm => "Approve accounts and adopt resolutions".to_string(),
            ObligationType::FileAccounts => {
                "Submit approved accounts to the commercial registry".to_string()
            }
            ObligationType::Archive => "Store signed PV, receipts, and filed documents".to_string(),
        }
    }
}

impl std::fmt::Display for ObligationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ObligationType::CollectYearInputs => "COLLECT_YEAR_INPUTS",
            ObligationType::CollectAccounts => "COLLECT_ACCOUNTS",
            ObligationType::DraftAgmPack => "DRAFT_AGM_PACK",
            ObligationType::SendConvocations => "SEND_CONVOCATIONS",
            ObligationType::HoldAgm => "HOLD_AGM",
            ObligationType::FileAccounts => "FILE_ACCOUNTS",
            ObligationType::Archive => "ARCHIVE",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerRole {
    President,
    Accountant,
}

impl std::fmt::Display for OwnerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerRole::President => write!(f, "PRESIDENT"),
            OwnerRole::Accountant => write!(f, "ACCOUNTANT"),
        }
    }
}

/// One dated obligation in the cycle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ObligationTask {
    #[serde(rename = "type")]
    pub obligation_type: ObligationType,

    pub title: String,

    pub due_date: NaiveDate,

    pub owner_role: OwnerRole,

    pub description: String,

    pub cycle_year: i32,
}

impl ObligationTask {
    /// Due date as an instant (midnight UTC)
    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_date.and_time(NaiveTime::MIN).and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_fill_only_absent_fields() {
        let overrides = GovernanceOverrides {
            notice_period_days: Some(21),
            approval_deadline_days: None,
        };

        let params = overrides.resolve(GovernanceParams::default());
        assert_eq!(params.notice_period_days, 21);
        assert_eq!(params.approval_deadline_days, 180);
    }

    #[test]
    fn test_zero_override_falls_back_to_base() {
        let overrides = GovernanceOverrides {
            notice_period_days: Some(0),
            approval_deadline_days: Some(0),
        };

        let params = overrides.resolve(GovernanceParams::default());
        assert_eq!(params, GovernanceParams::default());

        let base = GovernanceParams {
            notice_period_days: 21,
            approval_deadline_days: 150,
        };
        let params = overrides.resolve(base);
        assert_eq!(params, base);
    }

    #[test]
    fn test_obligation_type_serializes_screaming_snake() {
        let json = serde_json::to_string(&ObligationType::DraftAgmPack).unwrap();
        assert_eq!(json, "\"DRAFT_AGM_PACK\"");

        for t in ObligationType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t));
        }
    }

    #[test]
    fn test_only_accounts_collection_belongs_to_accountant() {
        let accountant: Vec<_> = ObligationType::ALL
            .iter()
            .filter(|t| t.owner_role() == OwnerRole::Accountant)
            .collect();
        assert_eq!(accountant, vec![&ObligationType::CollectAccounts]);
    }
}
