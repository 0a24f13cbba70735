//! Route definitions for statutory bracket tables.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::statutory;
use crate::state::AppState;

/// Statutory routes, merged at the top level.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/statutory", post(statutory::publish_table))
        .route("/statutory/{kind}", get(statutory::get_active_table))
}
