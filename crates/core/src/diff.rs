//! Run-to-run payslip comparison.
//!
//! Compares a run's payslips against the prior period's to flag anomalies
//! for reviewers. Pure and side-effect-free; flags warn, they never block
//! approval.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// Anomaly flag raised on one employee's payslip comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffFlag {
    /// No payslip in the prior run (new hire or newly in scope).
    New,
    /// |delta gross| exceeds the configured share of the prior gross.
    LargeChange,
    /// Gross went down against the prior period.
    Decreased,
    /// Overtime minutes exceed the configured threshold.
    HighOt,
}

impl DiffFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::LargeChange => "large_change",
            Self::Decreased => "decreased",
            Self::HighOt => "high_ot",
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for anomaly flagging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiffConfig {
    /// `LargeChange` fires when |delta| / prior gross exceeds this ratio.
    pub large_change_ratio: Decimal,
    /// `HighOt` fires when total OT minutes exceed this many minutes.
    pub high_ot_minutes: i32,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            large_change_ratio: dec!(0.10),
            high_ot_minutes: 20 * 60,
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs / outputs
// ---------------------------------------------------------------------------

/// The per-payslip facts the comparison needs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PayslipFacts {
    pub employee_id: DbId,
    pub gross: Decimal,
    pub ot_minutes: i32,
}

/// Comparison result for one employee.
#[derive(Debug, Clone, Serialize)]
pub struct PayslipDiff {
    pub employee_id: DbId,
    pub current_gross: Decimal,
    pub prior_gross: Option<Decimal>,
    pub delta: Decimal,
    pub flags: Vec<DiffFlag>,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Join current payslips to the prior run's by employee id and flag
/// anomalies. Employees only present in the prior run are not reported;
/// review cares about what is being paid now.
pub fn compare_runs(
    current: &[PayslipFacts],
    prior: &[PayslipFacts],
    config: &DiffConfig,
) -> Vec<PayslipDiff> {
    let prior_by_employee: HashMap<DbId, &PayslipFacts> =
        prior.iter().map(|p| (p.employee_id, p)).collect();

    current
        .iter()
        .map(|slip| {
            let prior_slip = prior_by_employee.get(&slip.employee_id);
            let prior_gross = prior_slip.map(|p| p.gross);
            let delta = slip.gross - prior_gross.unwrap_or(Decimal::ZERO);

            let mut flags = Vec::new();
            match prior_gross {
                None => flags.push(DiffFlag::New),
                Some(prior) => {
                    if prior > Decimal::ZERO
                        && (delta / prior).abs() > config.large_change_ratio
                    {
                        flags.push(DiffFlag::LargeChange);
                    }
                    if delta < Decimal::ZERO {
                        flags.push(DiffFlag::Decreased);
                    }
                }
            }
            if slip.ot_minutes > config.high_ot_minutes {
                flags.push(DiffFlag::HighOt);
            }

            PayslipDiff {
                employee_id: slip.employee_id,
                current_gross: slip.gross,
                prior_gross,
                delta,
                flags,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(employee_id: DbId, gross: Decimal, ot_minutes: i32) -> PayslipFacts {
        PayslipFacts {
            employee_id,
            gross,
            ot_minutes,
        }
    }

    #[test]
    fn missing_prior_payslip_flags_new() {
        let current = vec![facts(1, dec!(12000), 0)];
        let diffs = compare_runs(&current, &[], &DiffConfig::default());
        assert_eq!(diffs[0].flags, vec![DiffFlag::New]);
        assert_eq!(diffs[0].prior_gross, None);
    }

    #[test]
    fn large_increase_flags_large_change() {
        let current = vec![facts(1, dec!(12000), 0)];
        let prior = vec![facts(1, dec!(10000), 0)];
        let diffs = compare_runs(&current, &prior, &DiffConfig::default());
        assert_eq!(diffs[0].flags, vec![DiffFlag::LargeChange]);
        assert_eq!(diffs[0].delta, dec!(2000));
    }

    #[test]
    fn decrease_flags_decreased_and_large_change_when_big() {
        let current = vec![facts(1, dec!(7000), 0)];
        let prior = vec![facts(1, dec!(10000), 0)];
        let diffs = compare_runs(&current, &prior, &DiffConfig::default());
        assert_eq!(diffs[0].flags, vec![DiffFlag::LargeChange, DiffFlag::Decreased]);
    }

    #[test]
    fn small_change_raises_no_flags() {
        let current = vec![facts(1, dec!(10500), 0)];
        let prior = vec![facts(1, dec!(10000), 0)];
        let diffs = compare_runs(&current, &prior, &DiffConfig::default());
        assert!(diffs[0].flags.is_empty());
    }

    #[test]
    fn exactly_ten_percent_is_not_large() {
        let current = vec![facts(1, dec!(11000), 0)];
        let prior = vec![facts(1, dec!(10000), 0)];
        let diffs = compare_runs(&current, &prior, &DiffConfig::default());
        assert!(diffs[0].flags.is_empty());
    }

    #[test]
    fn high_ot_flags_over_threshold() {
        let config = DiffConfig {
            high_ot_minutes: 600,
            ..Default::default()
        };
        let current = vec![facts(1, dec!(10000), 601)];
        let prior = vec![facts(1, dec!(10000), 0)];
        let diffs = compare_runs(&current, &prior, &config);
        assert_eq!(diffs[0].flags, vec![DiffFlag::HighOt]);
    }

    #[test]
    fn joins_by_employee_id() {
        let current = vec![facts(1, dec!(10000), 0), facts(2, dec!(9000), 0)];
        let prior = vec![facts(2, dec!(9000), 0)];
        let diffs = compare_runs(&current, &prior, &DiffConfig::default());
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].flags, vec![DiffFlag::New]);
        assert!(diffs[1].flags.is_empty());
    }
}
