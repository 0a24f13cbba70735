//! Route definitions for pay periods, payroll runs, and payslips.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payroll;
use crate::state::AppState;

/// Payroll routes, merged at the top level.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/pay-periods",
            get(payroll::list_periods).post(payroll::create_period),
        )
        .route(
            "/payroll-runs",
            get(payroll::list_runs).post(payroll::create_run),
        )
        .route("/payroll-runs/{run_id}", get(payroll::get_run))
        .route("/payroll-runs/{run_id}/compute", post(payroll::compute_run))
        .route("/payroll-runs/{run_id}/diff", get(payroll::diff_run))
        .route("/payroll-runs/{run_id}/approve", post(payroll::approve_run))
        .route("/payroll-runs/{run_id}/release", post(payroll::release_run))
        .route("/payroll-runs/{run_id}/cancel", post(payroll::cancel_run))
        .route("/payroll-runs/{run_id}/payslips", get(payroll::list_payslips))
        .route("/payslips/{payslip_id}", get(payroll::get_payslip))
}
