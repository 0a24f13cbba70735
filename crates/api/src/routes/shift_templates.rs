//! Route definitions for shift templates.

use axum::routing::get;
use axum::Router;

use crate::handlers::shift_templates;
use crate::state::AppState;

/// Shift template routes, nested under `/shift-templates`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(shift_templates::list_templates).post(shift_templates::create_template),
        )
        .route(
            "/{template_id}",
            get(shift_templates::get_template).patch(shift_templates::update_template),
        )
}
