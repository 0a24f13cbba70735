//! Domain error taxonomy shared by the repository and API layers.

use chrono::NaiveDate;

use crate::types::DbId;

/// Domain-level error type.
///
/// Generic variants (not found, validation, conflict, forbidden, internal)
/// cover the CRUD surface; the payroll-specific variants carry enough
/// context for per-row error summaries.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Entity lookup failed.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a validation rule.
    #[error("{0}")]
    Validation(String),

    /// Request conflicts with current state.
    #[error("{0}")]
    Conflict(String),

    /// Caller is not allowed to perform the action.
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected internal failure.
    #[error("{0}")]
    Internal(String),

    /// Pay profile cannot produce usable rates (e.g. base rate <= 0).
    #[error("invalid rate configuration: {0}")]
    InvalidRateConfig(String),

    /// Disallowed payroll run state transition.
    #[error("invalid transition: {reason}")]
    InvalidTransition { reason: String },

    /// Attempted mutation of a locked attendance day, or a day-type change
    /// on a calendar event referenced by a locked record.
    #[error("locked record conflict: {0}")]
    LockedRecordConflict(String),

    /// A second calendar event on the same date of the same calendar.
    #[error("duplicate calendar event on {date} for calendar {calendar_id}")]
    DuplicateCalendarEvent { calendar_id: DbId, date: NaiveDate },

    /// Clock-in without clock-out. Reported per record, never fatal to a run.
    #[error("incomplete attendance for employee {employee_id} on {date}")]
    IncompleteAttendance { employee_id: DbId, date: NaiveDate },

    /// Monthly gross falls outside every configured bracket. Must fail
    /// loudly rather than default to a zero contribution.
    #[error("no {table} bracket covers monthly gross {gross}")]
    StatutoryLookupMiss { table: &'static str, gross: String },
}

impl CoreError {
    /// Stable machine-readable code, used in error summaries and HTTP bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::InvalidRateConfig(_) => "INVALID_RATE_CONFIG",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::LockedRecordConflict(_) => "LOCKED_RECORD_CONFLICT",
            Self::DuplicateCalendarEvent { .. } => "DUPLICATE_CALENDAR_EVENT",
            Self::IncompleteAttendance { .. } => "INCOMPLETE_ATTENDANCE",
            Self::StatutoryLookupMiss { .. } => "STATUTORY_LOOKUP_MISS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let err = CoreError::InvalidRateConfig("base rate must be positive".into());
        assert_eq!(err.code(), "INVALID_RATE_CONFIG");

        let err = CoreError::StatutoryLookupMiss {
            table: "sss",
            gross: "999999".into(),
        };
        assert_eq!(err.code(), "STATUTORY_LOOKUP_MISS");
    }

    #[test]
    fn display_includes_context() {
        let err = CoreError::NotFound {
            entity: "PayrollRun",
            id: 42,
        };
        assert_eq!(err.to_string(), "PayrollRun with id 42 not found");
    }
}
