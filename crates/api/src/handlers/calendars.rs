//! Handlers for holiday calendars and their events.
//!
//! Guards: one event per date per calendar, and no edits or deletes on an
//! event referenced by locked attendance.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use suweldo_core::audit::{actions, AuditEvent};
use suweldo_core::error::CoreError;
use suweldo_core::timeclock::CalendarDayType;
use suweldo_core::types::DbId;
use suweldo_db::models::calendar::{CreateCalendar, CreateCalendarEvent, UpdateCalendarEvent};
use suweldo_db::repositories::CalendarRepo;

use crate::context::Ctx;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/calendars
pub async fn create_calendar(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Json(input): Json<CreateCalendar>,
) -> AppResult<impl IntoResponse> {
    let calendar = CalendarRepo::create(&state.pool, ctx.company_id, &input).await?;

    tracing::info!(
        company_id = ctx.company_id,
        calendar_id = calendar.id,
        year = calendar.year,
        "Holiday calendar created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: calendar })))
}

/// GET /api/v1/calendars
pub async fn list_calendars(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let calendars = CalendarRepo::list_for_company(&state.pool, ctx.company_id).await?;
    Ok(Json(DataResponse { data: calendars }))
}

/// GET /api/v1/calendars/{calendar_id}/events
pub async fn list_events(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(calendar_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_calendar(&state, ctx.company_id, calendar_id).await?;
    let events = CalendarRepo::list_events(&state.pool, calendar_id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/calendars/{calendar_id}/events
pub async fn create_event(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(calendar_id): Path<DbId>,
    Json(input): Json<CreateCalendarEvent>,
) -> AppResult<impl IntoResponse> {
    ensure_calendar(&state, ctx.company_id, calendar_id).await?;
    CalendarDayType::parse(&input.day_type)?;

    let event = match CalendarRepo::create_event(&state.pool, calendar_id, &input).await {
        Ok(event) => event,
        Err(err) if is_unique_violation(&err) => {
            AuditEvent::new(&ctx, actions::CALENDAR_EVENT_REJECTED, "calendar_event", 0)
                .with_after(serde_json::json!({
                    "calendar_id": calendar_id,
                    "event_date": input.event_date,
                    "reason": "duplicate date",
                }))
                .emit();
            return Err(AppError::Core(CoreError::DuplicateCalendarEvent {
                calendar_id,
                date: input.event_date,
            }));
        }
        Err(err) => return Err(err.into()),
    };

    AuditEvent::new(&ctx, actions::CALENDAR_EVENT_CREATED, "calendar_event", event.id)
        .with_after(serde_json::to_value(&event).unwrap_or_default())
        .emit();
    tracing::info!(
        company_id = ctx.company_id,
        calendar_id,
        event_id = event.id,
        date = %event.event_date,
        day_type = %event.day_type,
        "Calendar event created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PATCH /api/v1/calendars/{calendar_id}/events/{event_id}
///
/// A day-type change on an event referenced by locked attendance would
/// silently reprice an approved run; it is rejected instead.
pub async fn update_event(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path((calendar_id, event_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCalendarEvent>,
) -> AppResult<impl IntoResponse> {
    ensure_calendar(&state, ctx.company_id, calendar_id).await?;
    let before = CalendarRepo::find_event_by_id(&state.pool, event_id)
        .await?
        .filter(|e| e.calendar_id == calendar_id)
        .ok_or(CoreError::NotFound {
            entity: "CalendarEvent",
            id: event_id,
        })?;

    if let Some(new_day_type) = &input.day_type {
        CalendarDayType::parse(new_day_type)?;
        if *new_day_type != before.day_type {
            let locked = CalendarRepo::count_locked_references(&state.pool, event_id).await?;
            if locked > 0 {
                AuditEvent::new(
                    &ctx,
                    actions::LOCKED_MUTATION_REJECTED,
                    "calendar_event",
                    event_id,
                )
                .emit();
                return Err(AppError::Core(CoreError::LockedRecordConflict(format!(
                    "Calendar event {event_id} is referenced by {locked} locked attendance days"
                ))));
            }
        }
    }

    let event = CalendarRepo::update_event(&state.pool, event_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "CalendarEvent",
            id: event_id,
        })?;

    AuditEvent::new(&ctx, actions::CALENDAR_EVENT_UPDATED, "calendar_event", event.id)
        .with_before(serde_json::to_value(&before).unwrap_or_default())
        .with_after(serde_json::to_value(&event).unwrap_or_default())
        .emit();
    tracing::info!(
        company_id = ctx.company_id,
        event_id = event.id,
        "Calendar event updated"
    );

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/calendars/{calendar_id}/events/{event_id}
pub async fn delete_event(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path((calendar_id, event_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_calendar(&state, ctx.company_id, calendar_id).await?;
    let event = CalendarRepo::find_event_by_id(&state.pool, event_id)
        .await?
        .filter(|e| e.calendar_id == calendar_id)
        .ok_or(CoreError::NotFound {
            entity: "CalendarEvent",
            id: event_id,
        })?;

    let references = CalendarRepo::count_references(&state.pool, event_id).await?;
    if references > 0 {
        AuditEvent::new(
            &ctx,
            actions::CALENDAR_EVENT_REJECTED,
            "calendar_event",
            event_id,
        )
        .with_after(serde_json::json!({ "reason": "referenced by attendance" }))
        .emit();
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Calendar event {event_id} is referenced by {references} attendance days"
        ))));
    }

    CalendarRepo::delete_event(&state.pool, event_id).await?;

    AuditEvent::new(&ctx, actions::CALENDAR_EVENT_DELETED, "calendar_event", event_id)
        .with_before(serde_json::to_value(&event).unwrap_or_default())
        .emit();
    tracing::info!(
        company_id = ctx.company_id,
        event_id,
        "Calendar event deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_calendar(
    state: &AppState,
    company_id: DbId,
    calendar_id: DbId,
) -> AppResult<()> {
    CalendarRepo::find_by_id(&state.pool, company_id, calendar_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "HolidayCalendar",
            id: calendar_id,
        })?;
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
