//! Shift template models.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use suweldo_core::types::{DbId, Timestamp};

/// A row from the `shift_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShiftTemplate {
    pub id: DbId,
    pub company_id: DbId,
    pub code: String,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_overnight: bool,
    pub break_minutes: i32,
    pub grace_late_min: i32,
    pub grace_early_out_min: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a shift template.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShiftTemplate {
    pub code: String,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_overnight: bool,
    pub break_minutes: i32,
    pub grace_late_min: i32,
    pub grace_early_out_min: i32,
}

/// DTO for updating a shift template.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShiftTemplate {
    pub name: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_overnight: Option<bool>,
    pub break_minutes: Option<i32>,
    pub grace_late_min: Option<i32>,
    pub grace_early_out_min: Option<i32>,
}
