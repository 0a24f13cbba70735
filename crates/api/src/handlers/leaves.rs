//! Handlers for approved leave records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use suweldo_core::error::CoreError;
use suweldo_core::types::DbId;
use suweldo_db::models::leave::CreateLeaveApproval;
use suweldo_db::repositories::{EmployeeRepo, LeaveRepo};

use crate::context::Ctx;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/leaves
pub async fn create_leave(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Json(input): Json<CreateLeaveApproval>,
) -> AppResult<impl IntoResponse> {
    if input.end_date < input.start_date {
        return Err(AppError::Core(CoreError::Validation(
            "Leave end date must not precede its start date".to_string(),
        )));
    }
    EmployeeRepo::find_by_id(&state.pool, ctx.company_id, input.employee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        })?;

    let leave = LeaveRepo::create(&state.pool, ctx.company_id, &input).await?;

    tracing::info!(
        company_id = ctx.company_id,
        leave_id = leave.id,
        employee_id = leave.employee_id,
        start = %leave.start_date,
        end = %leave.end_date,
        "Leave approval recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: leave })))
}

/// Query for leave listings.
#[derive(Debug, Deserialize)]
pub struct LeaveQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// GET /api/v1/employees/{employee_id}/leaves?start=...&end=...
pub async fn list_leaves(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
    Query(query): Query<LeaveQuery>,
) -> AppResult<impl IntoResponse> {
    EmployeeRepo::find_by_id(&state.pool, ctx.company_id, employee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id: employee_id,
        })?;

    let leaves =
        LeaveRepo::list_for_employee_range(&state.pool, employee_id, query.start, query.end)
            .await?;
    Ok(Json(DataResponse { data: leaves }))
}
