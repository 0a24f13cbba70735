//! Route definitions for holiday calendars and events.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::calendars;
use crate::state::AppState;

/// Calendar routes, nested under `/calendars`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(calendars::list_calendars).post(calendars::create_calendar),
        )
        .route(
            "/{calendar_id}/events",
            get(calendars::list_events).post(calendars::create_event),
        )
        .route(
            "/{calendar_id}/events/{event_id}",
            patch(calendars::update_event).delete(calendars::delete_event),
        )
}
