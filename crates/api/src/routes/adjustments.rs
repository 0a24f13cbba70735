//! Route definitions for manual adjustments.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::adjustments;
use crate::state::AppState;

/// Adjustment routes, nested under `/adjustments`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(adjustments::list_adjustments).post(adjustments::create_adjustment),
        )
        .route("/{adjustment_id}", delete(adjustments::delete_adjustment))
}
