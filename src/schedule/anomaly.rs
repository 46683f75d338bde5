//! Chronology checks on a computed cycle
//!
//! The convocation formula approximates months from days, so unusual
//! parameters can put the convocation before the pack or the accounts it
//! depends on. These are reported, never corrected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::{ObligationTask, ObligationType};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleAnomaly {
    ConvocationsBeforeDraftPack {
        convocations: NaiveDate,
        draft_pack: NaiveDate,
    },
    ConvocationsBeforeAccounts {
        convocations: NaiveDate,
        accounts: NaiveDate,
    },
}

impl std::fmt::Display for ScheduleAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleAnomaly::ConvocationsBeforeDraftPack {
                convocations,
                draft_pack,
            } => write!(
                f,
                "convocations due {} before the AGM pack draft ({})",
                convocations, draft_pack
            ),
            ScheduleAnomaly::ConvocationsBeforeAccounts {
                convocations,
                accounts,
            } => write!(
                f,
                "convocations due {} before the accounts are collected ({})",
                convocations, accounts
            ),
        }
    }
}

/// Flag chronology problems around the convocation date
pub fn find_anomalies(tasks: &[ObligationTask]) -> Vec<ScheduleAnomaly> {
    let due = |kind: ObligationType| {
        tasks
            .iter()
            .find(|t| t.obligation_type == kind)
            .map(|t| t.due_date)
    };

    let Some(convocations) = due(ObligationType::SendConvocations) else {
        return Vec::new();
    };

    let mut anomalies = Vec::new();

    if let Some(draft_pack) = due(ObligationType::DraftAgmPack) {
        if convocations < draft_pack {
            anomalies.push(ScheduleAnomaly::ConvocationsBeforeDraftPack {
                convocations,
                draft_pack,
            });
        }
    }

    if let Some(accounts) = due(ObligationType::CollectAccounts) {
        if convocations < accounts {
            anomalies.push(ScheduleAnomaly::ConvocationsBeforeAccounts {
                convocations,
                accounts,
            });
        }
    }

    anomalies
}
