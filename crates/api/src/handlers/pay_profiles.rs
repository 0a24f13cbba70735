//! Handlers for versioned pay profiles.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rust_decimal::Decimal;

use suweldo_core::error::CoreError;
use suweldo_core::rates::{PayFrequency, WageType};
use suweldo_core::types::DbId;
use suweldo_db::models::pay_profile::CreatePayProfile;
use suweldo_db::repositories::{EmployeeRepo, PayProfileRepo};

use crate::context::Ctx;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/pay-profiles
///
/// Creates a new profile version. Existing versions stay untouched; payslips
/// already computed keep the snapshot they were priced with.
pub async fn create_profile(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Json(input): Json<CreatePayProfile>,
) -> AppResult<impl IntoResponse> {
    WageType::parse(&input.wage_type)?;
    PayFrequency::parse(&input.pay_frequency)?;
    if input.base_rate <= Decimal::ZERO {
        return Err(AppError::Core(CoreError::InvalidRateConfig(format!(
            "base rate must be positive, got {}",
            input.base_rate
        ))));
    }
    EmployeeRepo::find_by_id(&state.pool, ctx.company_id, input.employee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        })?;

    let profile = PayProfileRepo::create(&state.pool, ctx.company_id, &input).await?;

    tracing::info!(
        company_id = ctx.company_id,
        profile_id = profile.id,
        employee_id = profile.employee_id,
        effective = %profile.effective_date,
        "Pay profile version created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// GET /api/v1/employees/{employee_id}/pay-profiles
pub async fn list_profiles(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    EmployeeRepo::find_by_id(&state.pool, ctx.company_id, employee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id: employee_id,
        })?;

    let profiles = PayProfileRepo::list_for_employee(&state.pool, employee_id).await?;
    Ok(Json(DataResponse { data: profiles }))
}
