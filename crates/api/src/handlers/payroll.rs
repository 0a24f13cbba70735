//! Handlers for pay periods, payroll runs, and payslips.
//!
//! The run lifecycle lives here: create, compute, review diff, approve,
//! release, cancel. Approval enforces segregation of duties and locks the
//! attendance the run consumed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use suweldo_core::audit::{actions, AuditEvent};
use suweldo_core::diff::{compare_runs, DiffConfig, PayslipFacts};
use suweldo_core::earnings::{thirteenth_month_pay, LineCategory};
use suweldo_core::error::CoreError;
use suweldo_core::run::{state_machine, validate_approval, RunStatus};
use suweldo_core::types::DbId;
use suweldo_db::models::payroll_run::{CreatePayPeriod, CreatePayrollRun};
use suweldo_db::models::payslip::PayslipFactsRow;
use suweldo_db::repositories::{
    ApproveOutcome, EmployeeRepo, PayPeriodRepo, PayrollRunRepo, PayslipRepo,
};

use crate::context::Ctx;
use crate::engine;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Pay periods
// ---------------------------------------------------------------------------

/// POST /api/v1/pay-periods
pub async fn create_period(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Json(input): Json<CreatePayPeriod>,
) -> AppResult<impl IntoResponse> {
    if input.end_date < input.start_date {
        return Err(AppError::Core(CoreError::Validation(
            "Pay period end date must not precede its start date".to_string(),
        )));
    }
    suweldo_core::rates::PayFrequency::parse(&input.frequency)?;

    let period = PayPeriodRepo::create(&state.pool, ctx.company_id, &input).await?;

    tracing::info!(
        company_id = ctx.company_id,
        period_id = period.id,
        start = %period.start_date,
        end = %period.end_date,
        "Pay period created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: period })))
}

/// GET /api/v1/pay-periods
pub async fn list_periods(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let periods = PayPeriodRepo::list_for_company(&state.pool, ctx.company_id).await?;
    Ok(Json(DataResponse { data: periods }))
}

// ---------------------------------------------------------------------------
// Payroll runs
// ---------------------------------------------------------------------------

/// POST /api/v1/payroll-runs
pub async fn create_run(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Json(input): Json<CreatePayrollRun>,
) -> AppResult<impl IntoResponse> {
    PayPeriodRepo::find_by_id(&state.pool, ctx.company_id, input.pay_period_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayPeriod",
            id: input.pay_period_id,
        })?;

    let run =
        PayrollRunRepo::create(&state.pool, ctx.company_id, input.pay_period_id, ctx.user_id)
            .await?;

    AuditEvent::new(&ctx, actions::RUN_CREATED, "payroll_run", run.id).emit();
    tracing::info!(
        company_id = ctx.company_id,
        run_id = run.id,
        pay_period_id = run.pay_period_id,
        "Payroll run created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: run })))
}

/// GET /api/v1/payroll-runs
pub async fn list_runs(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let runs = PayrollRunRepo::list_for_company(&state.pool, ctx.company_id).await?;
    Ok(Json(DataResponse { data: runs }))
}

/// GET /api/v1/payroll-runs/{run_id}
pub async fn get_run(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let run = PayrollRunRepo::find_by_id(&state.pool, ctx.company_id, run_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayrollRun",
            id: run_id,
        })?;
    Ok(Json(DataResponse { data: run }))
}

/// POST /api/v1/payroll-runs/{run_id}/compute
///
/// Also serves recompute: a run in review goes back through computing and
/// its payslips are rebuilt from current inputs.
pub async fn compute_run(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (run, summary) = engine::compute_run(&state.pool, &ctx, run_id).await?;

    tracing::info!(
        company_id = ctx.company_id,
        run_id = run.id,
        computed = summary.computed,
        failed = summary.failed,
        "Payroll run computed"
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({ "run": run, "summary": summary }),
    }))
}

/// Request body for the approve endpoint.
#[derive(Debug, Deserialize)]
pub struct ApproveRunRequest {
    /// The reviewer confirms the review checklist was worked through.
    pub checklist_acknowledged: bool,
}

/// POST /api/v1/payroll-runs/{run_id}/approve
pub async fn approve_run(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
    Json(input): Json<ApproveRunRequest>,
) -> AppResult<impl IntoResponse> {
    let run = PayrollRunRepo::find_by_id(&state.pool, ctx.company_id, run_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayrollRun",
            id: run_id,
        })?;

    let status = RunStatus::parse(&run.status)?;
    state_machine::validate_transition(status, RunStatus::Approved)?;
    validate_approval(ctx.user_id, run.created_by_id, input.checklist_acknowledged)?;

    let outcome =
        PayrollRunRepo::approve_and_lock(&state.pool, ctx.company_id, run_id, ctx.user_id)
            .await?;
    let run = match outcome {
        ApproveOutcome::Approved(run) => run,
        ApproveOutcome::NotInReview => {
            return Err(AppError::Core(CoreError::InvalidTransition {
                reason: "run left review before the approval landed".to_string(),
            }))
        }
        ApproveOutcome::PeriodAlreadyApproved => {
            return Err(AppError::Core(CoreError::Conflict(
                "Another run for this pay period is already approved".to_string(),
            )))
        }
    };

    AuditEvent::new(&ctx, actions::RUN_APPROVED, "payroll_run", run.id).emit();
    AuditEvent::new(&ctx, actions::RECORDS_LOCKED, "payroll_run", run.id).emit();
    tracing::info!(
        company_id = ctx.company_id,
        run_id = run.id,
        approver_id = ctx.user_id,
        "Payroll run approved and source records locked"
    );

    Ok(Json(DataResponse { data: run }))
}

/// POST /api/v1/payroll-runs/{run_id}/release
pub async fn release_run(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let run = PayrollRunRepo::find_by_id(&state.pool, ctx.company_id, run_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayrollRun",
            id: run_id,
        })?;

    let status = RunStatus::parse(&run.status)?;
    state_machine::validate_transition(status, RunStatus::Released)?;

    let run = PayrollRunRepo::release(&state.pool, ctx.company_id, run_id)
        .await?
        .ok_or_else(|| CoreError::InvalidTransition {
            reason: "run left approved before the release landed".to_string(),
        })?;

    AuditEvent::new(&ctx, actions::RUN_RELEASED, "payroll_run", run.id).emit();
    tracing::info!(company_id = ctx.company_id, run_id = run.id, "Payroll run released");

    Ok(Json(DataResponse { data: run }))
}

/// POST /api/v1/payroll-runs/{run_id}/cancel
pub async fn cancel_run(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let run = PayrollRunRepo::find_by_id(&state.pool, ctx.company_id, run_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayrollRun",
            id: run_id,
        })?;

    let status = RunStatus::parse(&run.status)?;
    state_machine::validate_transition(status, RunStatus::Cancelled)?;

    let run = PayrollRunRepo::cancel(&state.pool, ctx.company_id, run_id)
        .await?
        .ok_or_else(|| CoreError::InvalidTransition {
            reason: "run left a cancellable status before the cancel landed".to_string(),
        })?;

    AuditEvent::new(&ctx, actions::RUN_CANCELLED, "payroll_run", run.id).emit();
    tracing::info!(company_id = ctx.company_id, run_id = run.id, "Payroll run cancelled");

    Ok(Json(DataResponse { data: run }))
}

/// Optional threshold overrides for the run diff.
#[derive(Debug, Deserialize)]
pub struct DiffQuery {
    pub large_change_ratio: Option<rust_decimal::Decimal>,
    pub high_ot_minutes: Option<i32>,
}

/// GET /api/v1/payroll-runs/{run_id}/diff
///
/// Compares the run's payslips against the prior period's most authoritative
/// run. Flags warn reviewers; they never block approval.
pub async fn diff_run(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
    Query(query): Query<DiffQuery>,
) -> AppResult<impl IntoResponse> {
    let run = PayrollRunRepo::find_by_id(&state.pool, ctx.company_id, run_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayrollRun",
            id: run_id,
        })?;
    let period = PayPeriodRepo::find_by_id(&state.pool, ctx.company_id, run.pay_period_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayPeriod",
            id: run.pay_period_id,
        })?;

    let current = facts(PayslipRepo::facts_for_run(&state.pool, run_id).await?);
    let prior = match engine::prior_run_for_diff(&state.pool, ctx.company_id, &period).await? {
        Some(prior_run) => facts(PayslipRepo::facts_for_run(&state.pool, prior_run.id).await?),
        None => Vec::new(),
    };

    let defaults = DiffConfig::default();
    let config = DiffConfig {
        large_change_ratio: query.large_change_ratio.unwrap_or(defaults.large_change_ratio),
        high_ot_minutes: query.high_ot_minutes.unwrap_or(defaults.high_ot_minutes),
    };

    let diffs = compare_runs(&current, &prior, &config);
    Ok(Json(DataResponse { data: diffs }))
}

fn facts(rows: Vec<PayslipFactsRow>) -> Vec<PayslipFacts> {
    rows.into_iter()
        .map(|r| PayslipFacts {
            employee_id: r.employee_id,
            gross: r.gross,
            ot_minutes: r.ot_minutes,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payslips
// ---------------------------------------------------------------------------

/// GET /api/v1/payroll-runs/{run_id}/payslips
pub async fn list_payslips(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    PayrollRunRepo::find_by_id(&state.pool, ctx.company_id, run_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayrollRun",
            id: run_id,
        })?;

    let payslips = PayslipRepo::list_for_run(&state.pool, run_id).await?;
    Ok(Json(DataResponse { data: payslips }))
}

/// GET /api/v1/payslips/{payslip_id}
pub async fn get_payslip(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(payslip_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let payslip = PayslipRepo::find_by_id(&state.pool, payslip_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Payslip",
            id: payslip_id,
        })?;

    // Tenant check through the owning run.
    PayrollRunRepo::find_by_id(&state.pool, ctx.company_id, payslip.run_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Payslip",
            id: payslip_id,
        })?;

    let lines = PayslipRepo::list_lines(&state.pool, payslip_id).await?;
    let statutory = PayslipRepo::list_statutory(&state.pool, payslip_id).await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "payslip": payslip,
            "lines": lines,
            "statutory": statutory,
        }),
    }))
}

// ---------------------------------------------------------------------------
// Thirteenth month
// ---------------------------------------------------------------------------

/// Query for the thirteenth month projection.
#[derive(Debug, Deserialize)]
pub struct ThirteenthMonthQuery {
    pub year: i32,
}

/// GET /api/v1/employees/{employee_id}/thirteenth-month?year=YYYY
///
/// Accrued thirteenth month pay: one twelfth of the year's released basic
/// earnings.
pub async fn thirteenth_month(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
    Query(query): Query<ThirteenthMonthQuery>,
) -> AppResult<impl IntoResponse> {
    EmployeeRepo::find_by_id(&state.pool, ctx.company_id, employee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id: employee_id,
        })?;

    let ytd_basic = PayslipRepo::ytd_category_total(
        &state.pool,
        employee_id,
        query.year,
        LineCategory::Basic.as_str(),
    )
    .await?;
    let amount = thirteenth_month_pay(ytd_basic);

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "employee_id": employee_id,
            "year": query.year,
            "ytd_basic": ytd_basic,
            "thirteenth_month_pay": amount,
        }),
    }))
}
