pub mod adjustments;
pub mod attendance;
pub mod calendars;
pub mod employees;
pub mod health;
pub mod payroll;
pub mod shift_templates;
pub mod statutory;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /employees                                   list, create
/// /employees/{id}                              get, update
/// /employees/{id}/leaves                       list leaves
/// /employees/{id}/pay-profiles                 list profile versions
/// /employees/{id}/thirteenth-month             accrued 13th month pay
///
/// /shift-templates                             list, create
/// /shift-templates/{id}                        get, update
///
/// /calendars                                   list, create
/// /calendars/{id}/events                       list, create
/// /calendars/{id}/events/{event_id}            update, delete
///
/// /attendance                                  list by range
/// /attendance/import                           punch import (POST)
/// /attendance/{id}                             manual override (PATCH)
///
/// /leaves                                      record approval (POST)
///
/// /pay-profiles                                new profile version (POST)
///
/// /statutory                                   publish table version (POST)
/// /statutory/{kind}                            active brackets
///
/// /adjustments                                 list, create
/// /adjustments/{id}                            delete
///
/// /pay-periods                                 list, create
/// /payroll-runs                                list, create
/// /payroll-runs/{id}                           get
/// /payroll-runs/{id}/compute                   compute or recompute (POST)
/// /payroll-runs/{id}/diff                      review diff vs prior period
/// /payroll-runs/{id}/approve                   approve and lock (POST)
/// /payroll-runs/{id}/release                   release (POST)
/// /payroll-runs/{id}/cancel                    cancel (POST)
/// /payroll-runs/{id}/payslips                  list payslips
/// /payslips/{id}                               payslip with lines
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/employees", employees::router())
        .nest("/shift-templates", shift_templates::router())
        .nest("/calendars", calendars::router())
        .nest("/attendance", attendance::router())
        .nest("/adjustments", adjustments::router())
        .merge(employees::pay_profiles_router())
        .merge(statutory::router())
        .merge(payroll::router())
}
