//! Handlers for manual adjustments (commissions and deductions).
//!
//! Adjustments attach to a pay period and employee rather than a run, so a
//! recompute picks them up again without re-entry.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use suweldo_core::adjustments::{validate_adjustment, AdjustmentItem, AdjustmentKind};
use suweldo_core::error::CoreError;
use suweldo_core::types::DbId;
use suweldo_db::models::payslip::CreateManualAdjustment;
use suweldo_db::repositories::{AdjustmentRepo, EmployeeRepo, PayPeriodRepo};

use crate::context::Ctx;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/adjustments
pub async fn create_adjustment(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Json(input): Json<CreateManualAdjustment>,
) -> AppResult<impl IntoResponse> {
    let item = AdjustmentItem {
        kind: AdjustmentKind::parse(&input.kind)?,
        description: input.description.clone(),
        amount: input.amount,
    };
    validate_adjustment(&item)?;

    PayPeriodRepo::find_by_id(&state.pool, ctx.company_id, input.pay_period_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayPeriod",
            id: input.pay_period_id,
        })?;
    EmployeeRepo::find_by_id(&state.pool, ctx.company_id, input.employee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        })?;

    let adjustment = AdjustmentRepo::create(&state.pool, ctx.company_id, &input).await?;

    tracing::info!(
        company_id = ctx.company_id,
        adjustment_id = adjustment.id,
        employee_id = adjustment.employee_id,
        kind = %adjustment.kind,
        "Manual adjustment created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: adjustment })))
}

/// Query for adjustment listings.
#[derive(Debug, Deserialize)]
pub struct AdjustmentQuery {
    pub pay_period_id: DbId,
    pub employee_id: Option<DbId>,
}

/// GET /api/v1/adjustments?pay_period_id=...[&employee_id=...]
pub async fn list_adjustments(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Query(query): Query<AdjustmentQuery>,
) -> AppResult<impl IntoResponse> {
    PayPeriodRepo::find_by_id(&state.pool, ctx.company_id, query.pay_period_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayPeriod",
            id: query.pay_period_id,
        })?;

    let adjustments = match query.employee_id {
        Some(employee_id) => {
            AdjustmentRepo::list_for_employee_period(&state.pool, query.pay_period_id, employee_id)
                .await?
        }
        None => AdjustmentRepo::list_for_period(&state.pool, query.pay_period_id).await?,
    };
    Ok(Json(DataResponse { data: adjustments }))
}

/// DELETE /api/v1/adjustments/{adjustment_id}
pub async fn delete_adjustment(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(adjustment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AdjustmentRepo::delete(&state.pool, ctx.company_id, adjustment_id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "ManualAdjustment",
            id: adjustment_id,
        }
        .into());
    }

    tracing::info!(
        company_id = ctx.company_id,
        adjustment_id,
        "Manual adjustment deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
