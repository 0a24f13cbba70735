//! Handlers for shift templates.
//!
//! Schedule edits are rejected while locked attendance references the
//! template through an employee assignment; history must stay priced as it
//! was approved.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use suweldo_core::audit::{actions, AuditEvent};
use suweldo_core::error::CoreError;
use suweldo_core::types::DbId;
use suweldo_db::models::shift_template::{CreateShiftTemplate, UpdateShiftTemplate};
use suweldo_db::repositories::ShiftTemplateRepo;

use crate::context::Ctx;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/shift-templates
pub async fn create_template(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Json(input): Json<CreateShiftTemplate>,
) -> AppResult<impl IntoResponse> {
    validate_template(input.break_minutes, input.grace_late_min, input.grace_early_out_min)?;

    let template = ShiftTemplateRepo::create(&state.pool, ctx.company_id, &input).await?;

    tracing::info!(
        company_id = ctx.company_id,
        template_id = template.id,
        code = %template.code,
        "Shift template created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// GET /api/v1/shift-templates
pub async fn list_templates(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let templates = ShiftTemplateRepo::list_for_company(&state.pool, ctx.company_id).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// GET /api/v1/shift-templates/{template_id}
pub async fn get_template(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = ShiftTemplateRepo::find_by_id(&state.pool, ctx.company_id, template_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ShiftTemplate",
            id: template_id,
        })?;
    Ok(Json(DataResponse { data: template }))
}

/// PATCH /api/v1/shift-templates/{template_id}
pub async fn update_template(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
    Json(input): Json<UpdateShiftTemplate>,
) -> AppResult<impl IntoResponse> {
    let before = ShiftTemplateRepo::find_by_id(&state.pool, ctx.company_id, template_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ShiftTemplate",
            id: template_id,
        })?;

    let changes_schedule = input.start_time.is_some()
        || input.end_time.is_some()
        || input.is_overnight.is_some()
        || input.break_minutes.is_some()
        || input.grace_late_min.is_some()
        || input.grace_early_out_min.is_some();
    if changes_schedule {
        let locked = ShiftTemplateRepo::count_locked_references(&state.pool, template_id).await?;
        if locked > 0 {
            AuditEvent::new(
                &ctx,
                actions::LOCKED_MUTATION_REJECTED,
                "shift_template",
                template_id,
            )
            .emit();
            return Err(AppError::Core(CoreError::LockedRecordConflict(format!(
                "Shift template {template_id} backs {locked} locked attendance days"
            ))));
        }
    }

    if let Some(break_minutes) = input.break_minutes {
        validate_template(
            break_minutes,
            input.grace_late_min.unwrap_or(before.grace_late_min),
            input.grace_early_out_min.unwrap_or(before.grace_early_out_min),
        )?;
    }

    let template = ShiftTemplateRepo::update(&state.pool, ctx.company_id, template_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ShiftTemplate",
            id: template_id,
        })?;

    AuditEvent::new(&ctx, actions::SHIFT_TEMPLATE_UPDATED, "shift_template", template.id)
        .with_before(serde_json::to_value(&before).unwrap_or_default())
        .with_after(serde_json::to_value(&template).unwrap_or_default())
        .emit();
    tracing::info!(
        company_id = ctx.company_id,
        template_id = template.id,
        "Shift template updated"
    );

    Ok(Json(DataResponse { data: template }))
}

fn validate_template(
    break_minutes: i32,
    grace_late_min: i32,
    grace_early_out_min: i32,
) -> Result<(), CoreError> {
    if break_minutes < 0 || grace_late_min < 0 || grace_early_out_min < 0 {
        return Err(CoreError::Validation(
            "Break and grace minutes must not be negative".to_string(),
        ));
    }
    Ok(())
}
