//! Handlers for employee records.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use suweldo_core::error::CoreError;
use suweldo_core::types::DbId;
use suweldo_db::models::employee::{CreateEmployee, UpdateEmployee};
use suweldo_db::repositories::{EmployeeRepo, ShiftTemplateRepo};

use crate::context::Ctx;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/employees
pub async fn create_employee(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Json(input): Json<CreateEmployee>,
) -> AppResult<impl IntoResponse> {
    if let Some(template_id) = input.shift_template_id {
        ShiftTemplateRepo::find_by_id(&state.pool, ctx.company_id, template_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "ShiftTemplate",
                id: template_id,
            })?;
    }

    let employee = EmployeeRepo::create(&state.pool, ctx.company_id, &input).await?;

    tracing::info!(
        company_id = ctx.company_id,
        employee_id = employee.id,
        employee_code = %employee.employee_code,
        "Employee created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: employee })))
}

/// GET /api/v1/employees
pub async fn list_employees(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let employees = EmployeeRepo::list_active(&state.pool, ctx.company_id).await?;
    Ok(Json(DataResponse { data: employees }))
}

/// GET /api/v1/employees/{employee_id}
pub async fn get_employee(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::find_by_id(&state.pool, ctx.company_id, employee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id: employee_id,
        })?;
    Ok(Json(DataResponse { data: employee }))
}

/// PATCH /api/v1/employees/{employee_id}
pub async fn update_employee(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
    Json(input): Json<UpdateEmployee>,
) -> AppResult<impl IntoResponse> {
    if let Some(template_id) = input.shift_template_id {
        ShiftTemplateRepo::find_by_id(&state.pool, ctx.company_id, template_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "ShiftTemplate",
                id: template_id,
            })?;
    }

    let employee = EmployeeRepo::update(&state.pool, ctx.company_id, employee_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id: employee_id,
        })?;

    tracing::info!(
        company_id = ctx.company_id,
        employee_id = employee.id,
        "Employee updated"
    );

    Ok(Json(DataResponse { data: employee }))
}
