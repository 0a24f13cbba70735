//! Pay period and payroll run models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use suweldo_core::types::{DbId, Timestamp};

/// A row from the `pay_periods` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayPeriod {
    pub id: DbId,
    pub company_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a pay period.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: String,
}

/// A row from the `payroll_runs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayrollRun {
    pub id: DbId,
    pub company_id: DbId,
    pub pay_period_id: DbId,
    pub status: String,
    pub created_by_id: DbId,
    pub approved_by_id: Option<DbId>,
    pub computed_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub released_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a payroll run.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayrollRun {
    pub pay_period_id: DbId,
}
