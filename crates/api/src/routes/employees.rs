//! Route definitions for employees and their nested resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{employees, leaves, pay_profiles, payroll};
use crate::state::AppState;

/// Employee routes, nested under `/employees`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employees::list_employees).post(employees::create_employee))
        .route(
            "/{employee_id}",
            get(employees::get_employee).patch(employees::update_employee),
        )
        .route("/{employee_id}/leaves", get(leaves::list_leaves))
        .route("/{employee_id}/pay-profiles", get(pay_profiles::list_profiles))
        .route("/{employee_id}/thirteenth-month", get(payroll::thirteenth_month))
}

/// Top-level routes for leave approvals and pay profile versions.
pub fn pay_profiles_router() -> Router<AppState> {
    Router::new()
        .route("/pay-profiles", post(pay_profiles::create_profile))
        .route("/leaves", post(leaves::create_leave))
}
