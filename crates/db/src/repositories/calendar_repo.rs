//! Repository for the `holiday_calendars` and `calendar_events` tables.

use chrono::NaiveDate;
use sqlx::PgPool;
use suweldo_core::types::DbId;

use crate::models::calendar::{
    CalendarEvent, CreateCalendar, CreateCalendarEvent, HolidayCalendar, UpdateCalendarEvent,
};

/// Column list for holiday_calendars queries.
const CALENDAR_COLUMNS: &str = "id, company_id, year, name, created_at, updated_at";

/// Column list for calendar_events queries.
const EVENT_COLUMNS: &str =
    "id, calendar_id, event_date, day_type, name, created_at, updated_at";

/// Provides CRUD operations for holiday calendars and their events.
pub struct CalendarRepo;

impl CalendarRepo {
    /// Insert a new calendar, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateCalendar,
    ) -> Result<HolidayCalendar, sqlx::Error> {
        let query = format!(
            "INSERT INTO holiday_calendars (company_id, year, name)
             VALUES ($1, $2, $3)
             RETURNING {CALENDAR_COLUMNS}"
        );
        sqlx::query_as::<_, HolidayCalendar>(&query)
            .bind(company_id)
            .bind(input.year)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a calendar by ID within a company.
    pub async fn find_by_id(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<HolidayCalendar>, sqlx::Error> {
        let query = format!(
            "SELECT {CALENDAR_COLUMNS} FROM holiday_calendars
             WHERE id = $1 AND company_id = $2"
        );
        sqlx::query_as::<_, HolidayCalendar>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// List a company's calendars, newest year first.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<HolidayCalendar>, sqlx::Error> {
        let query = format!(
            "SELECT {CALENDAR_COLUMNS} FROM holiday_calendars
             WHERE company_id = $1
             ORDER BY year DESC"
        );
        sqlx::query_as::<_, HolidayCalendar>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new event. A duplicate (calendar_id, event_date) surfaces as
    /// a unique violation; the caller maps it to a domain error.
    pub async fn create_event(
        pool: &PgPool,
        calendar_id: DbId,
        input: &CreateCalendarEvent,
    ) -> Result<CalendarEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO calendar_events (calendar_id, event_date, day_type, name)
             VALUES ($1, $2, $3, $4)
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(calendar_id)
            .bind(input.event_date)
            .bind(&input.day_type)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID.
    pub async fn find_event_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM calendar_events WHERE id = $1");
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a calendar's events in date order.
    pub async fn list_events(
        pool: &PgPool,
        calendar_id: DbId,
    ) -> Result<Vec<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM calendar_events
             WHERE calendar_id = $1
             ORDER BY event_date ASC"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(calendar_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch a company's events falling inside a date range.
    pub async fn list_events_in_range(
        pool: &PgPool,
        company_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, sqlx::Error> {
        sqlx::query_as::<_, CalendarEvent>(
            "SELECT ce.id, ce.calendar_id, ce.event_date, ce.day_type, ce.name,
                    ce.created_at, ce.updated_at
             FROM calendar_events ce
             JOIN holiday_calendars hc ON hc.id = ce.calendar_id
             WHERE hc.company_id = $1 AND ce.event_date BETWEEN $2 AND $3
             ORDER BY ce.event_date ASC",
        )
        .bind(company_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// Apply a partial update to an event, returning the updated row.
    pub async fn update_event(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCalendarEvent,
    ) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE calendar_events SET
                day_type = COALESCE($1, day_type),
                name = COALESCE($2, name)
             WHERE id = $3
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(&input.day_type)
            .bind(&input.name)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event by ID. Returns `true` if a row was deleted.
    pub async fn delete_event(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count locked attendance days that reference this event. A non-zero
    /// count blocks edits and deletes.
    pub async fn count_locked_references(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM attendance_days
             WHERE calendar_event_id = $1 AND is_locked = TRUE",
        )
        .bind(event_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Count attendance days referencing this event at all.
    pub async fn count_references(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM attendance_days WHERE calendar_event_id = $1",
        )
        .bind(event_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
