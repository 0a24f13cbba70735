//! Manual payslip adjustments.
//!
//! Ad-hoc commissions and deductions entered outside attendance. They are
//! folded into the payslip after earnings and statutory computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of a manual adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Commission,
    Deduction,
}

impl AdjustmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Commission => "commission",
            Self::Deduction => "deduction",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "commission" => Ok(Self::Commission),
            "deduction" => Ok(Self::Deduction),
            other => Err(CoreError::Validation(format!(
                "Invalid adjustment kind '{other}'"
            ))),
        }
    }
}

/// One manual adjustment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentItem {
    pub kind: AdjustmentKind,
    pub description: String,
    /// Always entered positive; the kind decides the sign.
    pub amount: Decimal,
}

impl AdjustmentItem {
    /// The amount with the kind's sign applied.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            AdjustmentKind::Commission => self.amount,
            AdjustmentKind::Deduction => -self.amount,
        }
    }
}

/// Validate an adjustment entry: amounts must be positive.
pub fn validate_adjustment(item: &AdjustmentItem) -> Result<(), CoreError> {
    if item.amount <= Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "Adjustment amount must be positive, got {}",
            item.amount
        )));
    }
    if item.description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Adjustment description must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Net effect of a set of adjustments.
pub fn net_adjustment(items: &[AdjustmentItem]) -> Decimal {
    items.iter().map(AdjustmentItem::signed_amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    #[test]
    fn commission_adds_deduction_subtracts() {
        let items = vec![
            AdjustmentItem {
                kind: AdjustmentKind::Commission,
                description: "Sales incentive".into(),
                amount: dec!(1500),
            },
            AdjustmentItem {
                kind: AdjustmentKind::Deduction,
                description: "Cash advance".into(),
                amount: dec!(500),
            },
        ];
        assert_eq!(net_adjustment(&items), dec!(1000));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let item = AdjustmentItem {
            kind: AdjustmentKind::Commission,
            description: "x".into(),
            amount: Decimal::ZERO,
        };
        assert_matches!(validate_adjustment(&item), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_description_is_rejected() {
        let item = AdjustmentItem {
            kind: AdjustmentKind::Deduction,
            description: "  ".into(),
            amount: dec!(100),
        };
        assert_matches!(validate_adjustment(&item), Err(CoreError::Validation(_)));
    }
}
