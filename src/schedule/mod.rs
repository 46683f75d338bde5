//! Annual obligation retro-planning
//!
//! Works forward and backward from the fiscal year end and the statutory
//! deadlines to date the seven obligations of a governance cycle:
//! 1. Collect year inputs and accounts (4 and 4.5 months after year end)
//! 2. Draft the AGM pack (5 months)
//! 3. Send convocations (approval deadline in whole months, minus notice)
//! 4. Hold the AGM, file the accounts, archive
//!
//! Everything here is pure: no store, no clock.

pub mod anomaly;
pub mod scheduler;
pub mod types;

pub use anomaly::{find_anomalies, ScheduleAnomaly};
pub use scheduler::{parse_fiscal_year_end, plan_obligations, schedule};
pub use types::{
    GovernanceCycle, GovernanceOverrides, GovernanceParams, ObligationTask, ObligationType,
    OwnerRole,
};
