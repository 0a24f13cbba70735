//! Holiday calendar and calendar event models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use suweldo_core::types::{DbId, Timestamp};

/// A row from the `holiday_calendars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HolidayCalendar {
    pub id: DbId,
    pub company_id: DbId,
    pub year: i32,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `calendar_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CalendarEvent {
    pub id: DbId,
    pub calendar_id: DbId,
    pub event_date: NaiveDate,
    pub day_type: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a holiday calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCalendar {
    pub year: i32,
    pub name: String,
}

/// DTO for creating a calendar event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCalendarEvent {
    pub event_date: NaiveDate,
    pub day_type: String,
    pub name: String,
}

/// DTO for updating a calendar event.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCalendarEvent {
    pub day_type: Option<String>,
    pub name: Option<String>,
}
