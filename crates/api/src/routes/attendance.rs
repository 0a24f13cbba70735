//! Route definitions for attendance days.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Attendance routes, nested under `/attendance`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(attendance::list_attendance))
        .route("/import", post(attendance::import_punches))
        .route("/{attendance_id}", patch(attendance::override_attendance))
}
