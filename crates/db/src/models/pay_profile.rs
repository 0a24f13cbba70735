//! Pay profile models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use suweldo_core::types::{DbId, Timestamp};

/// A row from the `pay_profiles` table. Profiles are versioned by
/// `effective_date`; the latest one on or before a period's end applies.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayProfile {
    pub id: DbId,
    pub company_id: DbId,
    pub employee_id: DbId,
    pub wage_type: String,
    pub base_rate: Decimal,
    pub pay_frequency: String,
    pub effective_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a pay profile version.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayProfile {
    pub employee_id: DbId,
    pub wage_type: String,
    pub base_rate: Decimal,
    pub pay_frequency: String,
    pub effective_date: NaiveDate,
}
