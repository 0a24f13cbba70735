//! Repository for the `attendance_days` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use suweldo_core::types::DbId;

use crate::models::attendance::{AttendanceDay, OverrideAttendance, ResolvedAttendance};

/// Column list for attendance_days queries.
const COLUMNS: &str = "id, company_id, employee_id, work_date, clock_in_min, clock_out_min, \
    day_type, day_type_override, status, calendar_event_id, worked_minutes, basic_minutes, \
    late_minutes, undertime_minutes, ot_early_in_minutes, ot_late_out_minutes, \
    ot_rest_day_minutes, ot_holiday_minutes, night_diff_minutes, break_applied_minutes, \
    scheduled_work_minutes, daily_rate_override, worked_through_break, early_in_approved, \
    late_out_approved, \
    is_incomplete, is_locked, created_at, updated_at";

/// Provides operations for raw and resolved attendance days.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Find one attendance day by ID within a company.
    pub async fn find_by_id(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<AttendanceDay>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_days WHERE id = $1 AND company_id = $2"
        );
        sqlx::query_as::<_, AttendanceDay>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// Find one employee's attendance day by date.
    pub async fn find_by_employee_date(
        pool: &PgPool,
        employee_id: DbId,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceDay>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_days
             WHERE employee_id = $1 AND work_date = $2"
        );
        sqlx::query_as::<_, AttendanceDay>(&query)
            .bind(employee_id)
            .bind(work_date)
            .fetch_optional(pool)
            .await
    }

    /// List one employee's attendance days over a date range, in date order.
    pub async fn list_for_employee_range(
        pool: &PgPool,
        employee_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceDay>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_days
             WHERE employee_id = $1 AND work_date BETWEEN $2 AND $3
             ORDER BY work_date ASC"
        );
        sqlx::query_as::<_, AttendanceDay>(&query)
            .bind(employee_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// List a company's attendance days over a date range.
    pub async fn list_for_company_range(
        pool: &PgPool,
        company_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceDay>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_days
             WHERE company_id = $1 AND work_date BETWEEN $2 AND $3
             ORDER BY employee_id ASC, work_date ASC"
        );
        sqlx::query_as::<_, AttendanceDay>(&query)
            .bind(company_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// Upsert the raw punches for one employee and date. Locked rows are
    /// skipped; the returned row is `None` when the target was locked.
    pub async fn upsert_punches(
        pool: &PgPool,
        company_id: DbId,
        employee_id: DbId,
        work_date: NaiveDate,
        clock_in_min: Option<i32>,
        clock_out_min: Option<i32>,
    ) -> Result<Option<AttendanceDay>, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance_days
                (company_id, employee_id, work_date, clock_in_min, clock_out_min)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (employee_id, work_date) DO UPDATE SET
                clock_in_min = EXCLUDED.clock_in_min,
                clock_out_min = EXCLUDED.clock_out_min
             WHERE attendance_days.is_locked = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceDay>(&query)
            .bind(company_id)
            .bind(employee_id)
            .bind(work_date)
            .bind(clock_in_min)
            .bind(clock_out_min)
            .fetch_optional(pool)
            .await
    }

    /// Apply a manual override to an unlocked day, returning the updated row.
    ///
    /// Double-optional fields distinguish "leave unchanged" (outer `None`)
    /// from "clear the value" (inner `None`).
    pub async fn apply_override(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
        input: &OverrideAttendance,
    ) -> Result<Option<AttendanceDay>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance_days SET
                clock_in_min = CASE WHEN $1 THEN $2 ELSE clock_in_min END,
                clock_out_min = CASE WHEN $3 THEN $4 ELSE clock_out_min END,
                day_type_override = CASE WHEN $5 THEN $6 ELSE day_type_override END,
                daily_rate_override = CASE WHEN $7 THEN $8 ELSE daily_rate_override END,
                worked_through_break = COALESCE($9, worked_through_break),
                early_in_approved = COALESCE($10, early_in_approved),
                late_out_approved = COALESCE($11, late_out_approved)
             WHERE id = $12 AND company_id = $13 AND is_locked = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceDay>(&query)
            .bind(input.clock_in_min.is_some())
            .bind(input.clock_in_min.flatten())
            .bind(input.clock_out_min.is_some())
            .bind(input.clock_out_min.flatten())
            .bind(input.day_type_override.is_some())
            .bind(input.day_type_override.clone().flatten())
            .bind(input.daily_rate_override.is_some())
            .bind(input.daily_rate_override.flatten())
            .bind(input.worked_through_break)
            .bind(input.early_in_approved)
            .bind(input.late_out_approved)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// Write back the resolved classification and minute buckets for one day.
    pub async fn store_resolution(
        pool: &PgPool,
        id: DbId,
        resolved: &ResolvedAttendance,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE attendance_days SET
                day_type = $1,
                status = $2,
                calendar_event_id = $3,
                worked_minutes = $4,
                basic_minutes = $5,
                late_minutes = $6,
                undertime_minutes = $7,
                ot_early_in_minutes = $8,
                ot_late_out_minutes = $9,
                ot_rest_day_minutes = $10,
                ot_holiday_minutes = $11,
                night_diff_minutes = $12,
                break_applied_minutes = $13,
                scheduled_work_minutes = $14,
                is_incomplete = $15
             WHERE id = $16 AND is_locked = FALSE",
        )
        .bind(&resolved.day_type)
        .bind(&resolved.status)
        .bind(resolved.calendar_event_id)
        .bind(resolved.worked_minutes)
        .bind(resolved.basic_minutes)
        .bind(resolved.late_minutes)
        .bind(resolved.undertime_minutes)
        .bind(resolved.ot_early_in_minutes)
        .bind(resolved.ot_late_out_minutes)
        .bind(resolved.ot_rest_day_minutes)
        .bind(resolved.ot_holiday_minutes)
        .bind(resolved.night_diff_minutes)
        .bind(resolved.break_applied_minutes)
        .bind(resolved.scheduled_work_minutes)
        .bind(resolved.is_incomplete)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Ensure a row exists for every (employee, date) pair in the range so
    /// absent days get resolved too. Existing rows are untouched.
    pub async fn seed_range(
        pool: &PgPool,
        company_id: DbId,
        employee_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO attendance_days (company_id, employee_id, work_date)
             SELECT $1, $2, d::date
             FROM generate_series($3::date, $4::date, '1 day') AS d
             ON CONFLICT (employee_id, work_date) DO NOTHING",
        )
        .bind(company_id)
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .execute(pool)
        .await?;
        Ok(())
    }
}
