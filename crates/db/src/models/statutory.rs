//! Statutory bracket models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use suweldo_core::types::{DbId, Timestamp};

/// A row from the `statutory_brackets` table. One row per bracket; a full
/// table for a contribution kind is the set of rows sharing (kind, version).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatutoryBracket {
    pub id: DbId,
    pub kind: String,
    pub version: i32,
    pub floor: Decimal,
    pub ceiling: Option<Decimal>,
    pub employee_fixed: Decimal,
    pub employee_rate: Decimal,
    pub employer_fixed: Decimal,
    pub employer_rate: Decimal,
    pub rate_base: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for one bracket in a new table version.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBracket {
    pub floor: Decimal,
    pub ceiling: Option<Decimal>,
    pub employee_fixed: Decimal,
    pub employee_rate: Decimal,
    pub employer_fixed: Decimal,
    pub employer_rate: Decimal,
    pub rate_base: String,
}

/// DTO for publishing a new bracket table version for one kind.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBracketTable {
    pub kind: String,
    pub brackets: Vec<CreateBracket>,
}
