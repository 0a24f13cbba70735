//! Handlers for attendance days: range listing, punch import, and manual
//! overrides. Locked days reject every mutation, and the rejection itself is
//! audited.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use suweldo_core::audit::{actions, AuditEvent};
use suweldo_core::error::CoreError;
use suweldo_core::timeclock::MINUTES_PER_DAY;
use suweldo_core::types::DbId;
use suweldo_db::models::attendance::{ImportedPunch, OverrideAttendance};
use suweldo_db::repositories::{AttendanceRepo, EmployeeRepo};

use crate::context::Ctx;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query for attendance listings.
#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub employee_id: Option<DbId>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// GET /api/v1/attendance?start=...&end=...[&employee_id=...]
pub async fn list_attendance(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<impl IntoResponse> {
    let days = match query.employee_id {
        Some(employee_id) => {
            EmployeeRepo::find_by_id(&state.pool, ctx.company_id, employee_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Employee",
                    id: employee_id,
                })?;
            AttendanceRepo::list_for_employee_range(&state.pool, employee_id, query.start, query.end)
                .await?
        }
        None => {
            AttendanceRepo::list_for_company_range(&state.pool, ctx.company_id, query.start, query.end)
                .await?
        }
    };
    Ok(Json(DataResponse { data: days }))
}

/// Request body for a punch import.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub punches: Vec<ImportedPunch>,
}

/// POST /api/v1/attendance/import
///
/// Upserts raw punches from a timeclock export. Unknown employee codes and
/// locked days are skipped and counted, never fatal to the batch.
pub async fn import_punches(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Json(input): Json<ImportRequest>,
) -> AppResult<impl IntoResponse> {
    let mut imported = 0usize;
    let mut skipped_locked = 0usize;
    let mut unknown_codes: Vec<String> = Vec::new();

    for punch in &input.punches {
        if let Some(min) = punch.clock_in_min.or(punch.clock_out_min) {
            if !(0..MINUTES_PER_DAY).contains(&min) {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Punch minute {min} out of range for employee {}",
                    punch.employee_code
                ))));
            }
        }

        let Some(employee) =
            EmployeeRepo::find_by_code(&state.pool, ctx.company_id, &punch.employee_code).await?
        else {
            if !unknown_codes.contains(&punch.employee_code) {
                unknown_codes.push(punch.employee_code.clone());
            }
            continue;
        };

        let updated = AttendanceRepo::upsert_punches(
            &state.pool,
            ctx.company_id,
            employee.id,
            punch.work_date,
            punch.clock_in_min,
            punch.clock_out_min,
        )
        .await?;

        if updated.is_some() {
            imported += 1;
        } else {
            skipped_locked += 1;
        }
    }

    tracing::info!(
        company_id = ctx.company_id,
        imported,
        skipped_locked,
        unknown = unknown_codes.len(),
        "Attendance punches imported"
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "imported": imported,
            "skipped_locked": skipped_locked,
            "unknown_employee_codes": unknown_codes,
        }),
    }))
}

/// PATCH /api/v1/attendance/{attendance_id}
///
/// Manual correction of one day: punches, day-type override, rate override,
/// break and OT approval flags.
pub async fn override_attendance(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(attendance_id): Path<DbId>,
    Json(input): Json<OverrideAttendance>,
) -> AppResult<impl IntoResponse> {
    let before = AttendanceRepo::find_by_id(&state.pool, ctx.company_id, attendance_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "AttendanceDay",
            id: attendance_id,
        })?;

    if before.is_locked {
        AuditEvent::new(
            &ctx,
            actions::LOCKED_MUTATION_REJECTED,
            "attendance_day",
            attendance_id,
        )
        .emit();
        return Err(AppError::Core(CoreError::LockedRecordConflict(format!(
            "Attendance day {attendance_id} belongs to an approved run"
        ))));
    }

    let after = AttendanceRepo::apply_override(&state.pool, ctx.company_id, attendance_id, &input)
        .await?
        .ok_or(CoreError::LockedRecordConflict(format!(
            "Attendance day {attendance_id} was locked concurrently"
        )))?;

    AuditEvent::new(
        &ctx,
        actions::ATTENDANCE_OVERRIDDEN,
        "attendance_day",
        attendance_id,
    )
    .with_before(serde_json::to_value(&before).unwrap_or_default())
    .with_after(serde_json::to_value(&after).unwrap_or_default())
    .emit();

    tracing::info!(
        company_id = ctx.company_id,
        attendance_id,
        employee_id = after.employee_id,
        "Attendance day overridden"
    );

    Ok((StatusCode::OK, Json(DataResponse { data: after })))
}
