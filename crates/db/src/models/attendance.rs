//! Attendance day models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use suweldo_core::types::{DbId, Timestamp};

/// A row from the `attendance_days` table.
///
/// Punches are stored as minute-of-day (0..1439). An overnight clock-out
/// keeps its wall-clock minute; the resolver wraps it past midnight.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceDay {
    pub id: DbId,
    pub company_id: DbId,
    pub employee_id: DbId,
    pub work_date: NaiveDate,
    pub clock_in_min: Option<i32>,
    pub clock_out_min: Option<i32>,
    pub day_type: String,
    pub day_type_override: Option<String>,
    pub status: String,
    pub calendar_event_id: Option<DbId>,
    pub worked_minutes: i32,
    pub basic_minutes: i32,
    pub late_minutes: i32,
    pub undertime_minutes: i32,
    pub ot_early_in_minutes: i32,
    pub ot_late_out_minutes: i32,
    pub ot_rest_day_minutes: i32,
    pub ot_holiday_minutes: i32,
    pub night_diff_minutes: i32,
    pub break_applied_minutes: i32,
    /// Scheduled work minutes captured at resolution time; locked days are
    /// priced from this rather than the current shift template.
    pub scheduled_work_minutes: Option<i32>,
    pub daily_rate_override: Option<Decimal>,
    pub worked_through_break: bool,
    pub early_in_approved: bool,
    pub late_out_approved: bool,
    pub is_incomplete: bool,
    pub is_locked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One imported punch pair for an employee and date.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedPunch {
    pub employee_code: String,
    pub work_date: NaiveDate,
    pub clock_in_min: Option<i32>,
    pub clock_out_min: Option<i32>,
}

/// DTO for a manual attendance override. Only provided fields change.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideAttendance {
    pub clock_in_min: Option<Option<i32>>,
    pub clock_out_min: Option<Option<i32>>,
    pub day_type_override: Option<Option<String>>,
    pub daily_rate_override: Option<Option<Decimal>>,
    pub worked_through_break: Option<bool>,
    pub early_in_approved: Option<bool>,
    pub late_out_approved: Option<bool>,
}

/// The resolved classification and minute buckets written back after a
/// recompute of one attendance day.
#[derive(Debug, Clone)]
pub struct ResolvedAttendance {
    pub day_type: String,
    pub status: String,
    pub calendar_event_id: Option<DbId>,
    pub worked_minutes: i32,
    pub basic_minutes: i32,
    pub late_minutes: i32,
    pub undertime_minutes: i32,
    pub ot_early_in_minutes: i32,
    pub ot_late_out_minutes: i32,
    pub ot_rest_day_minutes: i32,
    pub ot_holiday_minutes: i32,
    pub night_diff_minutes: i32,
    pub break_applied_minutes: i32,
    pub scheduled_work_minutes: Option<i32>,
    pub is_incomplete: bool,
}
