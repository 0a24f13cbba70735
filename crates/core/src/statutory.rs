//! Statutory contribution and withholding tax computation.
//!
//! SSS, PhilHealth, Pag-IBIG, and BIR withholding are looked up from
//! versioned bracket tables supplied as configuration -- nothing here is
//! computed from first principles. The computation is deterministic and
//! idempotent: the same monthly gross against the same table version always
//! produces the same output, which is what makes recompute-before-approval
//! auditable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Contribution kinds
// ---------------------------------------------------------------------------

/// The four statutory deduction streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    Sss,
    Philhealth,
    Pagibig,
    WithholdingTax,
}

impl ContributionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sss => "sss",
            Self::Philhealth => "philhealth",
            Self::Pagibig => "pagibig",
            Self::WithholdingTax => "withholding_tax",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "sss" => Ok(Self::Sss),
            "philhealth" => Ok(Self::Philhealth),
            "pagibig" => Ok(Self::Pagibig),
            "withholding_tax" => Ok(Self::WithholdingTax),
            other => Err(CoreError::Validation(format!(
                "Invalid contribution kind '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Bracket tables
// ---------------------------------------------------------------------------

/// What a bracket's rate component applies to.
///
/// SSS and Pag-IBIG brackets are fixed amounts, PhilHealth is a rate of the
/// full gross, and BIR withholding is a fixed amount plus a rate of the
/// excess over the bracket floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBase {
    Gross,
    ExcessOverFloor,
}

/// One salary bracket row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Inclusive lower bound of monthly gross.
    pub floor: Decimal,
    /// Inclusive upper bound; `None` means open-ended.
    pub ceiling: Option<Decimal>,
    pub employee_fixed: Decimal,
    pub employee_rate: Decimal,
    pub employer_fixed: Decimal,
    pub employer_rate: Decimal,
    pub rate_base: RateBase,
}

impl Bracket {
    fn covers(&self, gross: Decimal) -> bool {
        gross >= self.floor && self.ceiling.map_or(true, |c| gross <= c)
    }

    fn rate_input(&self, gross: Decimal) -> Decimal {
        match self.rate_base {
            RateBase::Gross => gross,
            RateBase::ExcessOverFloor => gross - self.floor,
        }
    }

    /// Employee share for a gross inside this bracket.
    pub fn employee_share(&self, gross: Decimal) -> Decimal {
        self.employee_fixed + self.employee_rate * self.rate_input(gross)
    }

    /// Employer share for a gross inside this bracket.
    pub fn employer_share(&self, gross: Decimal) -> Decimal {
        self.employer_fixed + self.employer_rate * self.rate_input(gross)
    }
}

/// A versioned bracket table for one contribution kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    pub kind: ContributionKind,
    /// Table version, e.g. `"2025"` or `"2024-Q3"`. Carried onto every
    /// computed line so a payslip can always be traced to its inputs.
    pub version: String,
    pub brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Find the bracket covering `gross`. A miss fails loudly; defaulting
    /// to zero would silently underdeduct.
    pub fn lookup(&self, gross: Decimal) -> Result<&Bracket, CoreError> {
        self.brackets
            .iter()
            .find(|b| b.covers(gross))
            .ok_or(CoreError::StatutoryLookupMiss {
                table: self.kind.as_str(),
                gross: gross.to_string(),
            })
    }
}

/// The full set of tables a computation runs against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatutoryTables {
    pub sss: BracketTable,
    pub philhealth: BracketTable,
    pub pagibig: BracketTable,
    pub withholding_tax: BracketTable,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// One computed statutory line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatutoryLine {
    pub kind: ContributionKind,
    pub table_version: String,
    pub employee_share: Decimal,
    pub employer_share: Decimal,
}

/// All statutory lines for one employee-month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatutoryBreakdown {
    pub lines: Vec<StatutoryLine>,
    pub total_employee: Decimal,
    pub total_employer: Decimal,
}

/// Compute all statutory contributions from a monthly-equivalent gross.
///
/// Withholding tax is computed on the gross net of the employee's SSS,
/// PhilHealth, and Pag-IBIG shares, per BIR rules.
pub fn compute_statutory(
    monthly_gross: Decimal,
    tables: &StatutoryTables,
) -> Result<StatutoryBreakdown, CoreError> {
    let mut lines = Vec::with_capacity(4);

    for table in [&tables.sss, &tables.philhealth, &tables.pagibig] {
        let bracket = table.lookup(monthly_gross)?;
        lines.push(StatutoryLine {
            kind: table.kind,
            table_version: table.version.clone(),
            employee_share: bracket.employee_share(monthly_gross),
            employer_share: bracket.employer_share(monthly_gross),
        });
    }

    let contributions: Decimal = lines.iter().map(|l| l.employee_share).sum();
    let taxable = monthly_gross - contributions;
    let tax_bracket = tables.withholding_tax.lookup(taxable)?;
    lines.push(StatutoryLine {
        kind: ContributionKind::WithholdingTax,
        table_version: tables.withholding_tax.version.clone(),
        employee_share: tax_bracket.employee_share(taxable),
        employer_share: Decimal::ZERO,
    });

    let total_employee = lines.iter().map(|l| l.employee_share).sum();
    let total_employer = lines.iter().map(|l| l.employer_share).sum();

    Ok(StatutoryBreakdown {
        lines,
        total_employee,
        total_employer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    fn fixed_bracket(
        floor: Decimal,
        ceiling: Option<Decimal>,
        employee: Decimal,
        employer: Decimal,
    ) -> Bracket {
        Bracket {
            floor,
            ceiling,
            employee_fixed: employee,
            employee_rate: Decimal::ZERO,
            employer_fixed: employer,
            employer_rate: Decimal::ZERO,
            rate_base: RateBase::Gross,
        }
    }

    fn tables() -> StatutoryTables {
        StatutoryTables {
            sss: BracketTable {
                kind: ContributionKind::Sss,
                version: "2025".into(),
                brackets: vec![
                    fixed_bracket(dec!(0), Some(dec!(19999.99)), dec!(900), dec!(1900)),
                    fixed_bracket(dec!(20000), Some(dec!(34999.99)), dec!(1350), dec!(2850)),
                ],
            },
            philhealth: BracketTable {
                kind: ContributionKind::Philhealth,
                version: "2025".into(),
                brackets: vec![Bracket {
                    floor: dec!(0),
                    ceiling: None,
                    employee_fixed: Decimal::ZERO,
                    employee_rate: dec!(0.025),
                    employer_fixed: Decimal::ZERO,
                    employer_rate: dec!(0.025),
                    rate_base: RateBase::Gross,
                }],
            },
            pagibig: BracketTable {
                kind: ContributionKind::Pagibig,
                version: "2025".into(),
                brackets: vec![fixed_bracket(dec!(0), None, dec!(200), dec!(200))],
            },
            withholding_tax: BracketTable {
                kind: ContributionKind::WithholdingTax,
                version: "2023".into(),
                brackets: vec![
                    fixed_bracket(dec!(0), Some(dec!(20832.99)), dec!(0), dec!(0)),
                    Bracket {
                        floor: dec!(20833),
                        ceiling: Some(dec!(33332.99)),
                        employee_fixed: Decimal::ZERO,
                        employee_rate: dec!(0.15),
                        employer_fixed: Decimal::ZERO,
                        employer_rate: Decimal::ZERO,
                        rate_base: RateBase::ExcessOverFloor,
                    },
                ],
            },
        }
    }

    #[test]
    fn computes_all_four_streams() {
        let breakdown = compute_statutory(dec!(26000), &tables()).unwrap();
        assert_eq!(breakdown.lines.len(), 4);

        let sss = &breakdown.lines[0];
        assert_eq!(sss.kind, ContributionKind::Sss);
        assert_eq!(sss.employee_share, dec!(1350));
        assert_eq!(sss.employer_share, dec!(2850));

        let ph = &breakdown.lines[1];
        assert_eq!(ph.employee_share, dec!(650)); // 2.5% of 26000
    }

    #[test]
    fn tax_applies_to_gross_net_of_contributions() {
        let breakdown = compute_statutory(dec!(26000), &tables()).unwrap();
        // taxable = 26000 - 1350 - 650 - 200 = 23800
        // tax = 15% of (23800 - 20833) = 445.05
        let tax = breakdown
            .lines
            .iter()
            .find(|l| l.kind == ContributionKind::WithholdingTax)
            .unwrap();
        assert_eq!(tax.employee_share, dec!(445.05));
        assert_eq!(tax.employer_share, Decimal::ZERO);
    }

    #[test]
    fn totals_sum_all_lines() {
        let breakdown = compute_statutory(dec!(26000), &tables()).unwrap();
        assert_eq!(
            breakdown.total_employee,
            dec!(1350) + dec!(650) + dec!(200) + dec!(445.05),
        );
        assert_eq!(breakdown.total_employer, dec!(2850) + dec!(650) + dec!(200));
    }

    #[test]
    fn gross_outside_all_brackets_fails_loudly() {
        let err = compute_statutory(dec!(99999), &tables()).unwrap_err();
        assert_matches!(err, CoreError::StatutoryLookupMiss { table: "sss", .. });
    }

    #[test]
    fn same_inputs_same_outputs() {
        let a = compute_statutory(dec!(26000), &tables()).unwrap();
        let b = compute_statutory(dec!(26000), &tables()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn version_is_carried_onto_lines() {
        let breakdown = compute_statutory(dec!(26000), &tables()).unwrap();
        assert_eq!(breakdown.lines[0].table_version, "2025");
        assert_eq!(breakdown.lines[3].table_version, "2023");
    }
}
