//! Payslip, payslip line, statutory breakdown, and manual adjustment models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use suweldo_core::types::{DbId, Timestamp};

/// A row from the `payslips` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payslip {
    pub id: DbId,
    pub run_id: DbId,
    pub employee_id: DbId,
    pub status: String,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub wage_type: String,
    pub base_rate: Decimal,
    pub pay_frequency: String,
    pub gross: Decimal,
    pub total_statutory_employee: Decimal,
    pub total_adjustments: Decimal,
    pub net: Decimal,
    pub ot_minutes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `payslip_lines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayslipLine {
    pub id: DbId,
    pub payslip_id: DbId,
    pub category: String,
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub multiplier: Decimal,
    pub amount: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `payslip_statutory` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayslipStatutory {
    pub id: DbId,
    pub payslip_id: DbId,
    pub kind: String,
    pub table_version: i32,
    pub employee_share: Decimal,
    pub employer_share: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `manual_adjustments` table. Adjustments are keyed to the
/// pay period, not the run, so a recompute picks them up again.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ManualAdjustment {
    pub id: DbId,
    pub company_id: DbId,
    pub pay_period_id: DbId,
    pub employee_id: DbId,
    pub kind: String,
    pub description: String,
    pub amount: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a manual adjustment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateManualAdjustment {
    pub pay_period_id: DbId,
    pub employee_id: DbId,
    pub kind: String,
    pub description: String,
    pub amount: Decimal,
}

/// Everything the engine writes for one employee's computed payslip.
#[derive(Debug, Clone)]
pub struct NewPayslip {
    pub employee_id: DbId,
    pub status: String,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub wage_type: String,
    pub base_rate: Decimal,
    pub pay_frequency: String,
    pub gross: Decimal,
    pub total_statutory_employee: Decimal,
    pub total_adjustments: Decimal,
    pub net: Decimal,
    pub ot_minutes: i32,
    pub lines: Vec<NewPayslipLine>,
    pub statutory: Vec<NewPayslipStatutory>,
    pub source_day_ids: Vec<DbId>,
}

/// One line of a payslip being written.
#[derive(Debug, Clone)]
pub struct NewPayslipLine {
    pub category: String,
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub multiplier: Decimal,
    pub amount: Decimal,
}

/// One statutory contribution of a payslip being written.
#[derive(Debug, Clone)]
pub struct NewPayslipStatutory {
    pub kind: String,
    pub table_version: i32,
    pub employee_share: Decimal,
    pub employer_share: Decimal,
}

/// Per-employee facts used by the run-to-run diff.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayslipFactsRow {
    pub employee_id: DbId,
    pub gross: Decimal,
    pub ot_minutes: i32,
}
